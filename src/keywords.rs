//! Keyword extraction via stop-word-filtered frequency counting.
//!
//! Deliberately simple: lower-case, strip punctuation, count what remains.
//! Tokens shorter than 4 characters and stop words are discarded. Ties in
//! frequency are broken by first appearance in the text, which keeps the
//! output deterministic for a given input.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Standard keyword budget used when callers have no reason to deviate.
pub const DEFAULT_MAX_KEYWORDS: usize = 5;

/// [`extract_keywords`] with the standard budget of [`DEFAULT_MAX_KEYWORDS`].
pub fn extract_keywords_default(text: &str) -> Vec<String> {
    extract_keywords(text, DEFAULT_MAX_KEYWORDS)
}

/// Minimum token length (in chars) for a keyword candidate.
const MIN_TOKEN_LEN: usize = 4;

static RE_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?u)[^\w\s]").expect("punct regex"));

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
        "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does",
        "did", "will", "would", "could", "should", "may", "might", "must", "can", "this", "that",
        "these", "those", "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us",
        "them", "my", "your", "his", "its", "our", "their", "mine", "yours", "hers", "ours",
        "theirs",
    ]
    .into_iter()
    .collect()
});

/// Extract up to `max_keywords` salient terms from `text`, most frequent first.
///
/// Ordering: descending frequency, ties broken by first-seen position.
/// Empty or all-stop-word input yields an empty vec.
pub fn extract_keywords(text: &str, max_keywords: usize) -> Vec<String> {
    let lower = text.to_lowercase();
    let cleaned = RE_PUNCT.replace_all(&lower, "");

    // word -> (count, first-seen index)
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (pos, word) in cleaned.split_whitespace().enumerate() {
        if word.chars().count() < MIN_TOKEN_LEN || STOP_WORDS.contains(word) {
            continue;
        }
        let entry = counts.entry(word).or_insert((0, pos));
        entry.0 += 1;
    }

    let mut ranked: Vec<(&str, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));

    ranked
        .into_iter()
        .take(max_keywords)
        .map(|(w, _)| w.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_order() {
        let text = "economy economy economy market market policy";
        let kws = extract_keywords(text, 5);
        assert_eq!(kws, vec!["economy", "market", "policy"]);
    }

    #[test]
    fn ties_broken_by_first_seen() {
        let text = "alpha bravo alpha bravo charlie";
        let kws = extract_keywords(text, 5);
        assert_eq!(kws, vec!["alpha", "bravo", "charlie"]);
    }

    #[test]
    fn respects_max_keywords() {
        let text = "apple banana cherry damson elder feijoa grape";
        let kws = extract_keywords(text, 3);
        assert_eq!(kws.len(), 3);
    }

    #[test]
    fn default_budget_caps_output() {
        let text = "apple banana cherry damson elder feijoa grape honeydew";
        let kws = extract_keywords_default(text);
        assert_eq!(kws.len(), DEFAULT_MAX_KEYWORDS);
    }

    #[test]
    fn drops_stop_words_and_short_tokens() {
        let text = "the cat and the dog ran far with them";
        let kws = extract_keywords(text, 5);
        for kw in &kws {
            assert!(kw.chars().count() >= 4, "short token leaked: {kw}");
            assert!(!STOP_WORDS.contains(kw.as_str()), "stop word leaked: {kw}");
        }
    }

    #[test]
    fn punctuation_is_stripped() {
        let kws = extract_keywords("Break-through! Breakthrough, breakthrough.", 5);
        // "break-through" collapses to "breakthrough" once punctuation goes.
        assert_eq!(kws, vec!["breakthrough"]);
    }

    #[test]
    fn empty_and_stop_word_only_inputs() {
        assert!(extract_keywords("", 5).is_empty());
        assert!(extract_keywords("the and or but", 5).is_empty());
    }
}
