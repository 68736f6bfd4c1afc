use std::fmt;

use super::error::SearchError;

/// A validated, normalized ingredient search query.
///
/// Construction is the validation step: an empty or whitespace-only query never
/// reaches [`IngredientSearchEngine`](super::IngredientSearchEngine).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchQuery {
    normalized: String,
}

impl SearchQuery {
    /// Lowercases and trims `raw`.
    pub fn new(raw: &str) -> Result<Self, SearchError> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        Ok(Self { normalized })
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    /// `true` when the query has an internal space (more than one token).
    #[inline]
    pub fn is_multi_token(&self) -> bool {
        self.normalized.split_whitespace().nth(1).is_some()
    }

    /// Whitespace-delimited tokens.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.normalized.split_whitespace()
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized)
    }
}
