//! Whole-text similarity ratio.

use strsim::normalized_levenshtein;

/// Similarity of two texts in `[0, 1]`.
///
/// Normalized Levenshtein over Unicode scalar values:
/// `1 - distance / max(len_a, len_b)`. Symmetric, `1.0` for identical input
/// (including two empty strings).
pub fn similarity(a: &str, b: &str) -> f64 {
    normalized_levenshtein(a, b)
}
