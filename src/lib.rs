// src/lib.rs
// Public library surface for the Smart Sort ranking core.
//
// The crate is a pure in-process library: it consumes raw articles plus a
// corpus snapshot from the ingestion/persistence collaborators and hands back
// scores to attach before persisting. No I/O happens in here apart from
// reading the configuration file at startup.

pub mod aggregate;
pub mod article;
pub mod batch;
pub mod config;
pub mod corpus;
pub mod dimensions;
pub mod keywords;
pub mod legacy;
pub mod similarity;

// ---- Re-exports for stable public API ----
pub use crate::aggregate::{ScoreBreakdown, SmartScore, SmartScorer};
pub use crate::article::{Article, SummaryMeta};
pub use crate::batch::{dedup_against_corpus, ScoredArticle};
pub use crate::config::ScoringConfig;
pub use crate::corpus::{CorpusArticle, CorpusSnapshot};
