//! Lexical similarity between article titles.
//!
//! Similarity: `strsim::normalized_levenshtein` (returns f64 -> cast to f32)
//! over case-folded inputs. Symmetric, deterministic, no allocation beyond
//! the lowercase copies.

use strsim::normalized_levenshtein;

/// Similarity ratio between two titles in `[0.0, 1.0]`.
///
/// Both inputs are lower-cased before comparison, so the function is
/// case-insensitive and symmetric. Identical (case-folded) strings score 1.0;
/// an empty input on either side scores 0.0.
pub fn title_similarity(a: &str, b: &str) -> f32 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    normalized_levenshtein(&a, &b) as f32
}
