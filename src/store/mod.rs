//! Recipe corpus access.
//!
//! The core never manages connections; it asks a [`RecipeStore`] for one grouped
//! aggregation over the recipe ↔ ingredient association table.

pub mod client;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod model;


pub use client::{RecipeStore, SqliteRecipeStore};
pub use error::StoreError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockRecipeStore;
pub use model::{CoverageQuery, RecipeCoverage, RecipeId, RecipeRecord};
