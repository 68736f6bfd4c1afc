//! Pantry-aware recipe scoring.
//!
//! The store groups the association table per recipe (`n_used`, `total_ingredients`,
//! `total_score`); this module decides eligibility and order under a [`ScoringPolicy`]:
//!
//! - matched pantry staples weigh `1`, other matched ingredients `1 + alpha`
//! - recipes need a match, at least `min_ingredients` ingredients, and a positive rating
//! - the default key is coverage density, `total_score² / total_ingredients`
//! - weighted rating only breaks ties
//!
//! Results are truncated to the requested limit first and then de-duplicated by title.

pub mod engine;
pub mod error;
pub mod policy;
pub mod types;

#[cfg(test)]
mod tests;

pub use engine::{RecipeScoringEngine, rank};
pub use error::ScoringError;
pub use policy::{RankingFormula, ScoringPolicy};
pub use types::RecipeSummary;
