//! Read-only projection of the already-stored corpus, built once per batch.
//!
//! The snapshot carries exactly what the scorers compare against: the title
//! list (novelty), a normalized-title key set (exact-title dedup at the
//! persistence boundary) and the keyword frequency map (legacy keyword
//! novelty). It is a snapshot, not a live index — staleness within one
//! scoring pass is acceptable.

use crate::article::Article;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Minimal view of one stored article, as supplied by the persistence layer.
#[derive(Debug, Clone, Default)]
pub struct CorpusArticle {
    pub title: String,
    pub keywords: Vec<String>,
}

impl CorpusArticle {
    pub fn new(title: impl Into<String>, keywords: Vec<String>) -> Self {
        Self {
            title: title.into(),
            keywords,
        }
    }
}

impl From<&Article> for CorpusArticle {
    fn from(a: &Article) -> Self {
        Self {
            title: a.title.clone(),
            keywords: a.keywords.clone(),
        }
    }
}

/// Normalize a title into its dedup key: HTML entities decoded, lower-cased,
/// punctuation stripped, whitespace collapsed. Titles that differ only in
/// casing or punctuation map to the same key.
pub fn normalize_title(s: &str) -> String {
    static RE_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?u)[^\w\s]").expect("punct regex"));
    static RE_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("ws regex"));

    let decoded = html_escape::decode_html_entities(s).to_lowercase();
    let stripped = RE_PUNCT.replace_all(&decoded, "");
    RE_WS.replace_all(stripped.trim(), " ").into_owned()
}

/// One batch's view of everything already stored.
#[derive(Debug, Clone, Default)]
pub struct CorpusSnapshot {
    titles: Vec<String>,
    title_keys: HashSet<String>,
    keyword_freq: HashMap<String, u32>,
}

impl CorpusSnapshot {
    /// Empty snapshot: every candidate is fully novel. Used when the corpus
    /// is genuinely empty or could not be fetched; novelty degrades to its
    /// maximum instead of failing the batch.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_articles<I>(articles: I) -> Self
    where
        I: IntoIterator<Item = CorpusArticle>,
    {
        let mut titles = Vec::new();
        let mut title_keys = HashSet::new();
        let mut keyword_freq: HashMap<String, u32> = HashMap::new();

        for a in articles {
            title_keys.insert(normalize_title(&a.title));
            titles.push(a.title);
            for kw in a.keywords {
                *keyword_freq.entry(kw.to_lowercase()).or_insert(0) += 1;
            }
        }

        Self {
            titles,
            title_keys,
            keyword_freq,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    /// Stored titles, for pairwise novelty comparison.
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// Keyword -> occurrence count across the stored corpus (keys lower-cased).
    pub fn keyword_freq(&self) -> &HashMap<String, u32> {
        &self.keyword_freq
    }

    /// Exact-title membership via the normalized dedup key.
    pub fn contains_title(&self, title: &str) -> bool {
        self.title_keys.contains(&normalize_title(title))
    }
}
