//! Article data model: the unit being scored, plus its summary metadata.
//!
//! The core only ever sees UTC instants (`chrono::DateTime<Utc>`); any naive
//! timestamp ambiguity must be resolved by the ingestion collaborator before
//! an `Article` is constructed.

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata of an upstream AI-generated summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMeta {
    /// Structural rating on a 0–10 scale, produced by the summary pipeline.
    pub structure_score: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brief: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed: Option<String>,
}

impl SummaryMeta {
    pub fn new(structure_score: f32) -> Self {
        Self {
            structure_score,
            brief: None,
            detailed: None,
        }
    }
}

/// A news article as handed over by the ingestion pipeline.
///
/// `title` doubles as the natural dedup key for the corpus: two articles with
/// the same (normalized) title are considered duplicates. `vote_count` and
/// `summary` are the mutable fields that trigger re-scoring after ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub link: String,
    /// Publish instant, UTC. `None` when the feed did not carry a usable date.
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    /// Accumulated vote/"headline" count.
    #[serde(default)]
    pub vote_count: u32,
    /// How many other sources reported the same story.
    #[serde(default)]
    pub duplicate_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<SummaryMeta>,
    /// Extracted keyword set; insertion order irrelevant.
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl Article {
    /// Construct a scoreable article. A missing title is a hard error: such
    /// an article must be rejected before scoring, not silently zero-scored.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Result<Self> {
        let id = id.into();
        let title = title.into();
        if title.trim().is_empty() {
            bail!("article `{id}` has no title; rejecting before scoring");
        }
        Ok(Self {
            id,
            title,
            content: String::new(),
            source: String::new(),
            link: String::new(),
            published_at: None,
            vote_count: 0,
            duplicate_count: 0,
            summary: None,
            keywords: Vec::new(),
        })
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = link.into();
        self
    }

    pub fn with_published_at(mut self, at: DateTime<Utc>) -> Self {
        self.published_at = Some(at);
        self
    }

    pub fn with_votes(mut self, votes: u32) -> Self {
        self.vote_count = votes;
        self
    }

    pub fn with_summary(mut self, summary: SummaryMeta) -> Self {
        self.summary = Some(summary);
        self
    }

    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = keywords;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_with_defaults() {
        let a = Article::new("a1", "Some headline").unwrap();
        assert_eq!(a.vote_count, 0);
        assert!(a.published_at.is_none());
        assert!(a.summary.is_none());
    }

    #[test]
    fn empty_title_is_rejected() {
        assert!(Article::new("a1", "").is_err());
        assert!(Article::new("a1", "   ").is_err());
    }

    #[test]
    fn serde_round_trip_keeps_optionals() {
        let a = Article::new("a1", "Headline")
            .unwrap()
            .with_source("Reuters")
            .with_summary(SummaryMeta::new(7.5));
        let json = serde_json::to_string(&a).unwrap();
        let back: Article = serde_json::from_str(&json).unwrap();
        assert_eq!(a, back);
    }
}
