use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::IngredientId;

/// Recipe identifier in the corpus.
pub type RecipeId = i64;

/// Recipe metadata as stored in the corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeRecord {
    pub recipe_id: RecipeId,
    pub title: String,
    pub url: String,
    pub image_url: Option<String>,
    /// Aggregate user rating; recipes without a positive rating are never ranked.
    pub rating: Option<f64>,
    /// Quality metric used only to break ranking ties.
    pub weighted_rating: Option<f64>,
}

/// Inputs to the coverage aggregation, as typed sets rather than SQL fragments.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageQuery {
    /// Chosen ingredient ids, after substitution expansion.
    pub matched_ids: BTreeSet<IngredientId>,
    pub pantry_ids: BTreeSet<IngredientId>,
    /// Extra weight of a matched non-pantry ingredient.
    pub alpha: f64,
}

impl CoverageQuery {
    /// Weight contributed by one association row.
    ///
    /// `0` when unmatched, `1` when matched and a pantry staple, `1 + alpha` otherwise.
    pub fn contribution(&self, ingredient_id: IngredientId) -> f64 {
        if !self.matched_ids.contains(&ingredient_id) {
            0.0
        } else if self.pantry_ids.contains(&ingredient_id) {
            1.0
        } else {
            1.0 + self.alpha
        }
    }
}

/// One aggregated row: a recipe and how well the matched set covers it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeCoverage {
    pub recipe: RecipeRecord,
    /// Associated ingredients that are in the matched set.
    pub n_used: u32,
    /// All distinct associated ingredients.
    pub total_ingredients: u32,
    /// Sum of per-ingredient contributions.
    pub total_score: f64,
}
