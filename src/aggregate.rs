//! Smart score aggregation: six weighted dimension scores -> one clamped
//! scalar, plus the per-dimension breakdown for diagnostics and tests.

use crate::article::Article;
use crate::config::ScoringConfig;
use crate::corpus::CorpusSnapshot;
use crate::dimensions::{
    freshness_score, novelty_score, popularity_score, significance_score, source_weight_score,
    summary_quality_score,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

/// One float per dimension. Transient: used for explainability and tests,
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub significance: f32,
    pub freshness: f32,
    pub source_weight: f32,
    pub popularity: f32,
    pub novelty: f32,
    pub summary_quality: f32,
    /// The weighted, clamped aggregate.
    pub smart_score: f32,
}

impl ScoreBreakdown {
    /// Dimension-name -> score map, the shape a service boundary would ship
    /// as `breakdown` next to the scalar.
    pub fn to_map(&self) -> std::collections::BTreeMap<String, f32> {
        let mut m = std::collections::BTreeMap::new();
        m.insert("significance".to_string(), self.significance);
        m.insert("freshness".to_string(), self.freshness);
        m.insert("source_weight".to_string(), self.source_weight);
        m.insert("popularity".to_string(), self.popularity);
        m.insert("novelty".to_string(), self.novelty);
        m.insert("summary_quality".to_string(), self.summary_quality);
        m.insert("smart_score".to_string(), self.smart_score);
        m
    }
}

/// Aggregate result: the scalar for sorting plus the full breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SmartScore {
    pub value: f32,
    pub breakdown: ScoreBreakdown,
}

/// The aggregator. Holds the immutable configuration snapshot; cloning is
/// cheap (`Arc`), and every scorer invoked through one instance sees the
/// same tables.
#[derive(Debug, Clone)]
pub struct SmartScorer {
    config: Arc<ScoringConfig>,
}

impl SmartScorer {
    pub fn new(config: Arc<ScoringConfig>) -> Self {
        Self { config }
    }

    /// Scorer backed by the built-in seed configuration.
    pub fn seeded() -> Self {
        Self::new(Arc::new(ScoringConfig::default_seed()))
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score one article against the corpus snapshot at instant `now`.
    ///
    /// Deterministic: fixed inputs, fixed configuration and fixed `now`
    /// reproduce the result exactly.
    pub fn score(&self, article: &Article, corpus: &CorpusSnapshot, now: DateTime<Utc>) -> SmartScore {
        let cfg = &*self.config;

        let significance = significance_score(cfg, &article.title, &article.content);
        let freshness = freshness_score(cfg, article.published_at, now);
        let source_weight = source_weight_score(cfg, &article.source);
        let popularity = popularity_score(cfg, article.vote_count, article.duplicate_count);
        let novelty = novelty_score(cfg, &article.title, corpus.titles());
        let summary_quality = summary_quality_score(cfg, article.summary.as_ref());

        let w = &cfg.weights;
        let weighted = w.significance * significance
            + w.freshness * freshness
            + w.source_weight * source_weight
            + w.popularity * popularity
            + w.novelty * novelty
            + w.summary_quality * summary_quality;

        let value = cfg.global_range.clamp(weighted);

        SmartScore {
            value,
            breakdown: ScoreBreakdown {
                significance,
                freshness,
                source_weight,
                popularity,
                novelty,
                summary_quality,
                smart_score: value,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn scorer() -> SmartScorer {
        SmartScorer::seeded()
    }

    fn article() -> Article {
        Article::new("a1", "Major breakthrough in quantum computing")
            .unwrap()
            .with_content("Scientists achieve quantum supremacy in a landmark experiment")
            .with_source("The New York Times")
            .with_published_at(Utc::now() - Duration::hours(2))
            .with_votes(5)
    }

    #[test]
    fn aggregate_stays_within_global_range() {
        let s = scorer();
        let got = s.score(&article(), &CorpusSnapshot::empty(), Utc::now());
        assert!(s.config().global_range.contains(got.value), "out of range: {}", got.value);
        assert!((got.value - got.breakdown.smart_score).abs() < 1e-6);
    }

    #[test]
    fn deterministic_for_fixed_now() {
        let s = scorer();
        let now = Utc::now();
        let a = article();
        let first = s.score(&a, &CorpusSnapshot::empty(), now);
        let second = s.score(&a, &CorpusSnapshot::empty(), now);
        assert_eq!(first, second);
    }

    #[test]
    fn breakdown_serializes_with_dimension_names() {
        let s = scorer();
        let got = s.score(&article(), &CorpusSnapshot::empty(), Utc::now());
        let v: serde_json::Value = serde_json::to_value(got.breakdown).unwrap();
        for key in [
            "significance",
            "freshness",
            "source_weight",
            "popularity",
            "novelty",
            "summary_quality",
            "smart_score",
        ] {
            assert!(v.get(key).is_some(), "missing breakdown key {key}");
        }
        assert_eq!(got.breakdown.to_map().len(), 7);
    }

    #[test]
    fn incomplete_metadata_still_scores() {
        let s = scorer();
        // no timestamp, no summary, no keywords, unknown source
        let a = Article::new("a2", "Completely bare headline").unwrap();
        let got = s.score(&a, &CorpusSnapshot::empty(), Utc::now());
        assert!(s.config().global_range.contains(got.value));
    }
}
