//! Startup catalogs: ingredients, pantry staples, substitutions.
//!
//! All three are built once before the server binds its listener and are shared
//! read-only afterwards (wrap [`Catalogs`] in an `Arc`). Nothing here is reloaded
//! at runtime, so the derived token sets never go stale.

pub mod error;
pub mod ingredient;
pub mod loader;
pub mod pantry;
pub mod substitutions;


pub use error::CatalogError;
pub use ingredient::{Ingredient, IngredientCatalog, IngredientId, normalize_name};
pub use loader::{CatalogSources, Catalogs};
pub use pantry::PantrySet;
pub use substitutions::SubstitutionMap;
