use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use super::error::CatalogError;
use super::ingredient::{Ingredient, IngredientCatalog, IngredientId};
use super::pantry::PantrySet;
use super::substitutions::SubstitutionMap;

/// Locations of the three startup datasets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSources {
    /// CSV with `ingredient_id,ingredient_name`.
    pub ingredients: PathBuf,
    /// CSV with `ingredient_id,ingredient_name` (the name column is informational).
    pub pantry: PathBuf,
    /// JSON object mapping an ingredient name to its substitute names.
    pub substitutions: PathBuf,
}

impl CatalogSources {
    pub const INGREDIENTS_FILE: &'static str = "ingredients.csv";
    pub const PANTRY_FILE: &'static str = "pantry_ingredients.csv";
    pub const SUBSTITUTIONS_FILE: &'static str = "substitutions.json";

    /// Uses the default file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            ingredients: dir.join(Self::INGREDIENTS_FILE),
            pantry: dir.join(Self::PANTRY_FILE),
            substitutions: dir.join(Self::SUBSTITUTIONS_FILE),
        }
    }
}

/// The read-only lookups shared by every request.
#[derive(Debug, Clone, Default)]
pub struct Catalogs {
    pub ingredients: IngredientCatalog,
    pub pantry: PantrySet,
    pub substitutions: SubstitutionMap,
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    ingredient_id: IngredientId,
    ingredient_name: String,
}

impl Catalogs {
    /// Assembles catalogs from already-materialized tables.
    pub fn new<I, P>(
        ingredients: I,
        pantry_ids: P,
        substitutions: SubstitutionMap,
    ) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = Ingredient>,
        P: IntoIterator<Item = IngredientId>,
    {
        let ingredients = IngredientCatalog::new(ingredients)?;
        let pantry = PantrySet::new(pantry_ids, &ingredients)?;
        Ok(Self {
            ingredients,
            pantry,
            substitutions,
        })
    }

    /// Loads and indexes all three datasets. Any failure is fatal to startup.
    pub fn load(sources: &CatalogSources) -> Result<Self, CatalogError> {
        let ingredients = read_catalog_rows(&sources.ingredients)?
            .into_iter()
            .map(|row| Ingredient::new(row.ingredient_id, row.ingredient_name));
        let pantry_ids = read_catalog_rows(&sources.pantry)?
            .into_iter()
            .map(|row| row.ingredient_id);
        let substitutions = read_substitutions(&sources.substitutions)?;

        let catalogs = Self::new(ingredients, pantry_ids, substitutions)?;

        info!(
            ingredients = catalogs.ingredients.len(),
            pantry = catalogs.pantry.len(),
            substitutions = catalogs.substitutions.len(),
            "Catalogs loaded"
        );

        Ok(catalogs)
    }
}

fn ensure_exists(path: &Path) -> Result<(), CatalogError> {
    if !path.is_file() {
        return Err(CatalogError::SourceNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

fn read_catalog_rows(path: &Path) -> Result<Vec<CatalogRow>, CatalogError> {
    ensure_exists(path)?;

    let csv_error = |source| CatalogError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_error)?;

    reader
        .deserialize()
        .collect::<Result<Vec<CatalogRow>, _>>()
        .map_err(csv_error)
}

fn read_substitutions(path: &Path) -> Result<SubstitutionMap, CatalogError> {
    ensure_exists(path)?;

    let raw = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let table: HashMap<String, Vec<String>> =
        serde_json::from_str(&raw).map_err(|source| CatalogError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(SubstitutionMap::new(table))
}
