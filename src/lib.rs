//! Larder library crate (used by the server and integration tests).
//!
//! # Public API Surface
//!
//! The exports are organized by module:
//!
//! ## Core Types
//! - [`Catalogs`], [`IngredientCatalog`], [`PantrySet`], [`SubstitutionMap`] - Startup lookups
//! - [`IngredientSearchEngine`], [`SearchQuery`], [`Similarity`] - Fuzzy ingredient search
//! - [`SubstitutionExpander`] - One-hop substitution expansion
//! - [`RecipeScoringEngine`], [`ScoringPolicy`], [`RecipeSummary`] - Recipe ranking
//! - [`Recommender`] - Facade over the three engines
//!
//! ## Infrastructure
//! - [`Config`], [`ConfigError`] - Server configuration
//! - [`RecipeStore`], [`SqliteRecipeStore`] - Recipe corpus access
//! - [`SearchCache`], [`SearchCacheHandle`] - Search-result cache
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod gateway;
pub mod recommend;
pub mod scoring;
pub mod search;
pub mod store;
pub mod substitution;

pub use cache::{SearchCache, SearchCacheHandle};
pub use catalog::{
    CatalogError, CatalogSources, Catalogs, Ingredient, IngredientCatalog, IngredientId,
    PantrySet, SubstitutionMap,
};
pub use config::{Config, ConfigError};
pub use recommend::Recommender;
pub use scoring::{RankingFormula, RecipeScoringEngine, RecipeSummary, ScoringError, ScoringPolicy};
pub use search::{IngredientSearchEngine, SearchError, SearchHit, SearchQuery, Similarity, TokenSortRatio};
#[cfg(any(test, feature = "mock"))]
pub use store::MockRecipeStore;
pub use store::{
    CoverageQuery, RecipeCoverage, RecipeId, RecipeRecord, RecipeStore, SqliteRecipeStore,
    StoreError,
};
pub use substitution::{Expansion, ExpansionFault, SubstitutionExpander};
