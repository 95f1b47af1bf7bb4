//! The six dimension scorers behind the smart score.
//!
//! All of them are pure given their declared inputs plus the configuration;
//! freshness additionally takes an explicit `now` so results are reproducible
//! in tests. Missing or partial input falls back to a documented neutral
//! default — ranking never aborts because one article has incomplete
//! metadata.

use crate::article::SummaryMeta;
use crate::config::ScoringConfig;
use crate::similarity::title_similarity;
use chrono::{DateTime, Utc};

/// Significance: maximum tier whose keyword set matches the lower-cased
/// title+content as a substring.
///
/// All tiers are scanned and the maximum matching tier wins, not the first
/// match. Matching is plain substring matching: "war" also matches
/// "warrant".
pub fn significance_score(cfg: &ScoringConfig, title: &str, content: &str) -> f32 {
    let text = format!("{title} {content}").to_lowercase();

    let mut best: Option<f32> = None;
    for tier in &cfg.significance {
        if tier.keywords.iter().any(|kw| text.contains(&kw.to_lowercase())) {
            best = Some(best.map_or(tier.score, |b: f32| b.max(tier.score)));
        }
    }

    let lowest = cfg
        .significance
        .iter()
        .map(|t| t.score)
        .fold(f32::INFINITY, f32::min);
    cfg.significance_range.clamp(best.unwrap_or(lowest))
}

/// Freshness: elapsed hours since publication mapped through the config
/// buckets; monotonically non-increasing with age. Articles without a
/// usable timestamp get the neutral `missing_score`. A publish instant in
/// the future counts as zero elapsed hours.
pub fn freshness_score(
    cfg: &ScoringConfig,
    published_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> f32 {
    let Some(at) = published_at else {
        return cfg.freshness.missing_score;
    };
    let hours = ((now - at).num_seconds().max(0) as f32) / 3600.0;

    for bucket in &cfg.freshness.buckets {
        if hours <= bucket.max_hours {
            return bucket.score;
        }
    }
    cfg.freshness.beyond_score
}

/// Source credibility: exact, case-sensitive membership lookup against the
/// tiered mapping; unrecognized sources get the configured default.
pub fn source_weight_score(cfg: &ScoringConfig, source: &str) -> f32 {
    for tier in &cfg.sources {
        if tier.names.iter().any(|n| n == source) {
            return tier.score;
        }
    }
    cfg.default_source_score
}

/// Popularity: vote count bucketed into {0, 1–5, 6–10, >10}, plus a bonus
/// per duplicate report, clamped to the configured range.
pub fn popularity_score(cfg: &ScoringConfig, vote_count: u32, duplicate_count: u32) -> f32 {
    let p = &cfg.popularity;
    let base = match vote_count {
        0 => p.no_votes,
        1..=5 => p.low_votes,
        6..=10 => p.medium_votes,
        _ => p.high_votes,
    };
    p.range.clamp(base + p.duplicate_bonus * duplicate_count as f32)
}

/// Novelty (inverted: lower = more duplicate): maximum pairwise similarity
/// against the existing titles, mapped through the descending threshold
/// tiers. An empty corpus means fully novel.
pub fn novelty_score<S: AsRef<str>>(cfg: &ScoringConfig, title: &str, existing_titles: &[S]) -> f32 {
    if existing_titles.is_empty() {
        return cfg.novelty.unique_score;
    }

    let max_similarity = existing_titles
        .iter()
        .map(|t| title_similarity(title, t.as_ref()))
        .fold(0.0f32, f32::max);

    for tier in &cfg.novelty.tiers {
        if max_similarity >= tier.min_similarity {
            return tier.score;
        }
    }
    cfg.novelty.unique_score
}

/// Summary quality: the upstream structure score mapped through descending
/// breakpoints. No summary means the "none" tier.
pub fn summary_quality_score(cfg: &ScoringConfig, summary: Option<&SummaryMeta>) -> f32 {
    let Some(s) = summary else {
        return cfg.summary_quality.none_score;
    };
    for tier in &cfg.summary_quality.tiers {
        if s.structure_score >= tier.min_structure {
            return tier.score;
        }
    }
    cfg.summary_quality.none_score
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn cfg() -> ScoringConfig {
        ScoringConfig::default_seed()
    }

    #[test]
    fn significance_picks_maximum_matching_tier() {
        let c = cfg();
        // "merger" (6) and "war" (10) both present -> the 10 tier wins,
        // clamped to the significance range max.
        let s = significance_score(&c, "Merger talks collapse as war looms", "");
        assert!((s - c.significance_range.max).abs() < 1e-6);
    }

    #[test]
    fn significance_defaults_to_lowest_tier_clamped() {
        let c = cfg();
        let s = significance_score(&c, "Quiet day everywhere", "nothing noteworthy");
        assert!((s - c.significance_range.min).abs() < 1e-6);
    }

    #[test]
    fn significance_substring_matching_is_pinned() {
        let c = cfg();
        // "war" inside "warrant" matches; the classifier is substring-based.
        let s = significance_score(&c, "Court issues arrest warrant", "");
        assert!((s - c.significance_range.max).abs() < 1e-6);
    }

    #[test]
    fn freshness_is_monotone_non_increasing() {
        let c = cfg();
        let now = Utc::now();
        let hours = [0.5f32, 2.0, 5.0, 10.0, 20.0, 30.0, 60.0, 500.0];
        let mut prev = f32::INFINITY;
        for h in hours {
            let at = now - Duration::seconds((h * 3600.0) as i64);
            let s = freshness_score(&c, Some(at), now);
            assert!(s <= prev, "freshness went up at {h}h: {s} > {prev}");
            prev = s;
        }
    }

    #[test]
    fn freshness_seed_buckets_match_observed_behavior() {
        let c = cfg();
        let now = Utc::now();
        for (hours_ago, expected) in [(1i64, 10.0f32), (5, 7.0), (10, 5.0), (20, 3.0), (30, 1.0), (60, 0.0)] {
            let at = now - Duration::hours(hours_ago);
            let s = freshness_score(&c, Some(at), now);
            assert!(
                (s - expected).abs() < 1e-6,
                "{hours_ago}h ago: expected {expected}, got {s}"
            );
        }
    }

    #[test]
    fn freshness_missing_timestamp_is_neutral() {
        let c = cfg();
        let s = freshness_score(&c, None, Utc::now());
        assert!((s - c.freshness.missing_score).abs() < 1e-6);
    }

    #[test]
    fn freshness_future_timestamp_counts_as_now() {
        let c = cfg();
        let now = Utc::now();
        let s = freshness_score(&c, Some(now + Duration::hours(5)), now);
        assert!((s - c.freshness.buckets[0].score).abs() < 1e-6);
    }

    #[test]
    fn source_lookup_is_exact_and_case_sensitive() {
        let c = cfg();
        assert!((source_weight_score(&c, "Reuters") - 10.0).abs() < 1e-6);
        assert!((source_weight_score(&c, "BBC") - 9.0).abs() < 1e-6);
        // case-sensitive: "reuters" is not a configured name
        assert!((source_weight_score(&c, "reuters") - c.default_source_score).abs() < 1e-6);
        assert!((source_weight_score(&c, "Some Blog") - c.default_source_score).abs() < 1e-6);
    }

    #[test]
    fn popularity_buckets_and_bonus() {
        let c = cfg();
        let lo = popularity_score(&c, 0, 0);
        let mid = popularity_score(&c, 3, 0);
        let hi = popularity_score(&c, 15, 0);
        assert!(lo <= mid && mid <= hi);
        // duplicate reports add on top, still clamped to the range
        let with_dupes = popularity_score(&c, 3, 2);
        assert!(with_dupes >= mid);
        assert!(c.popularity.range.contains(with_dupes));
    }

    #[test]
    fn novelty_empty_corpus_is_fully_novel() {
        let c = cfg();
        let s = novelty_score(&c, "Anything at all", &[] as &[&str]);
        assert!((s - c.novelty.unique_score).abs() < 1e-6);
    }

    #[test]
    fn novelty_exact_duplicate_hits_minimum_tier() {
        let c = cfg();
        let existing = ["Trump wins election in landslide victory"];
        let s = novelty_score(&c, "Trump wins election in landslide victory", &existing);
        assert!((s - c.novelty.tiers[0].score).abs() < 1e-6);
    }

    #[test]
    fn novelty_unrelated_title_is_unique() {
        let c = cfg();
        let existing = ["Trump wins election in landslide victory"];
        let s = novelty_score(&c, "Penguins discovered thriving in Antarctica", &existing);
        assert!((s - c.novelty.unique_score).abs() < 1e-6);
    }

    #[test]
    fn summary_quality_breakpoints() {
        let c = cfg();
        for (structure, expected) in [(9.5f32, 10.0f32), (7.0, 8.0), (5.5, 6.0), (2.0, 3.0), (0.0, 0.0)] {
            let meta = SummaryMeta::new(structure);
            let s = summary_quality_score(&c, Some(&meta));
            assert!(
                (s - expected).abs() < 1e-6,
                "structure {structure}: expected {expected}, got {s}"
            );
        }
    }

    #[test]
    fn summary_quality_missing_is_none_tier() {
        let c = cfg();
        let s = summary_quality_score(&c, None);
        assert!((s - c.summary_quality.none_score).abs() < 1e-6);
    }
}
