//! The legacy composite score (the persisted `score` field that predates the
//! smart score).
//!
//! Five components, each already normalized to roughly [0,1] before
//! weighting: exponential time decay, AI summary structure, source rating,
//! keyword novelty against the corpus keyword map, and vote count. Kept
//! alongside the smart score because serving paths still sort on it.

use crate::article::{Article, SummaryMeta};
use crate::config::LegacyConfig;
use crate::corpus::CorpusSnapshot;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Exponential time-decay weight with the configured half-life.
/// 1.0 at publication, ~0.37 after one half-life. Missing timestamps and
/// future timestamps both count as "just published".
pub fn time_decay_weight(
    cfg: &LegacyConfig,
    published_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> f32 {
    let Some(at) = published_at else {
        return 1.0;
    };
    let hours = ((now - at).num_seconds().max(0) as f32) / 3600.0;
    (-hours / cfg.half_life_hours).exp()
}

/// Structure score of the AI summary clamped to the 1..max_rating scale;
/// a missing summary gets the mid-scale default of 3.0.
pub fn structure_score(cfg: &LegacyConfig, summary: Option<&SummaryMeta>) -> f32 {
    match summary {
        Some(s) => s.structure_score.clamp(1.0, cfg.max_rating),
        None => 3.0,
    }
}

/// Source rating normalized by the maximum rating.
pub fn source_rating(cfg: &LegacyConfig, source: &str) -> f32 {
    let rating = cfg
        .source_ratings
        .get(source)
        .copied()
        .unwrap_or(cfg.default_rating);
    rating / cfg.max_rating
}

/// Fraction of the article's keywords that the corpus has not seen yet.
/// An article without keywords gets a middle-of-the-road 0.5.
pub fn keyword_novelty(keywords: &[String], keyword_freq: &HashMap<String, u32>) -> f32 {
    if keywords.is_empty() {
        return 0.5;
    }
    let unseen = keywords
        .iter()
        .filter(|kw| !keyword_freq.contains_key(&kw.to_lowercase()))
        .count();
    unseen as f32 / keywords.len() as f32
}

/// Vote count normalized against the saturation point, capped at 1.0.
pub fn headline_score(cfg: &LegacyConfig, vote_count: u32) -> f32 {
    (vote_count as f32 / cfg.headline_saturation).min(1.0)
}

/// The weighted legacy composite, rounded to 3 decimals (stored as-is).
pub fn legacy_score(
    cfg: &LegacyConfig,
    article: &Article,
    corpus: &CorpusSnapshot,
    now: DateTime<Utc>,
) -> f32 {
    let w = &cfg.weights;
    let total = time_decay_weight(cfg, article.published_at, now) * w.time
        + structure_score(cfg, article.summary.as_ref()) * w.structure
        + source_rating(cfg, &article.source) * w.source
        + keyword_novelty(&article.keywords, corpus.keyword_freq()) * w.keyword_novelty
        + headline_score(cfg, article.vote_count) * w.headline;

    (total * 1000.0).round() / 1000.0
}
