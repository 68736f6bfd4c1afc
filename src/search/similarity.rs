//! Pluggable fuzzy string similarity.
//!
//! The search engine only needs a number in `[0, 100]`; swapping the algorithm never
//! touches candidate generation.

use strsim::normalized_levenshtein;

use crate::constants::MAX_SIMILARITY;

/// Scores how alike two strings are, from `0.0` (unrelated) to `100.0` (identical).
pub trait Similarity: Send + Sync {
    fn similarity(&self, a: &str, b: &str) -> f64;
}

impl<F> Similarity for F
where
    F: Fn(&str, &str) -> f64 + Send + Sync,
{
    fn similarity(&self, a: &str, b: &str) -> f64 {
        self(a, b)
    }
}

/// Token-order-insensitive ratio: sort the whitespace tokens of both sides, then
/// compare the re-joined strings by normalized Levenshtein distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenSortRatio;

impl TokenSortRatio {
    pub fn new() -> Self {
        Self
    }
}

impl Similarity for TokenSortRatio {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        let a = sorted_tokens(a);
        let b = sorted_tokens(b);
        normalized_levenshtein(&a, &b) * MAX_SIMILARITY
    }
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}
