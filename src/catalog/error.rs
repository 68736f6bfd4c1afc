//! Catalog error types.
//!
//! Every variant is a startup failure: the process must not serve requests with a
//! catalog that failed to build.

use std::path::PathBuf;
use thiserror::Error;

use super::IngredientId;

/// Errors that can occur while loading or indexing the startup datasets.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A required data file does not exist.
    #[error("catalog source not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// A data file could not be read.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV table was malformed.
    #[error("malformed CSV in '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The substitution table was malformed.
    #[error("malformed JSON in '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Two catalog rows share an id.
    #[error("duplicate ingredient id {id}")]
    DuplicateId { id: IngredientId },

    /// Two catalog rows share a (normalized) name.
    #[error("duplicate ingredient name '{name}' (ids {first} and {second})")]
    DuplicateName {
        name: String,
        first: IngredientId,
        second: IngredientId,
    },

    /// A catalog row has an empty name after normalization.
    #[error("ingredient {id} has an empty name")]
    EmptyName { id: IngredientId },

    /// A pantry row references an id missing from the catalog.
    #[error("pantry ingredient {id} is not in the ingredient catalog")]
    UnknownPantryIngredient { id: IngredientId },
}
