//! Fuzzy ingredient search.
//!
//! A query goes through two stages:
//!
//! 1. **Candidate generation.** Multi-token queries match ingredients sharing any
//!    token (or its singular/plural counterpart); single-token queries match by
//!    substring, again with the inflected form.
//! 2. **Ranking.** Candidates are scored against the original query with a
//!    [`Similarity`] implementation ([`TokenSortRatio`] by default) and truncated.

pub mod engine;
pub mod error;
pub mod inflect;
pub mod query;
pub mod similarity;

#[cfg(test)]
mod tests;

pub use engine::{IngredientSearchEngine, SearchHit};
pub use error::SearchError;
pub use query::SearchQuery;
pub use similarity::{Similarity, TokenSortRatio};
