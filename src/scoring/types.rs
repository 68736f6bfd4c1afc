use serde::{Deserialize, Serialize};

use crate::store::{RecipeCoverage, RecipeId};

/// A ranked recipe as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: RecipeId,
    pub title: String,
    pub url: String,
    pub image_url: Option<String>,
    pub rating: f64,
    pub n_used: u32,
    pub total_ingredients: u32,
    /// Primary ranking key under the active policy.
    pub score: f64,
}

impl RecipeSummary {
    /// Builds a summary from an eligible coverage row. A missing rating reads as `0.0`.
    pub fn from_coverage(coverage: RecipeCoverage, score: f64) -> Self {
        let RecipeCoverage {
            recipe,
            n_used,
            total_ingredients,
            ..
        } = coverage;

        Self {
            id: recipe.recipe_id,
            title: recipe.title,
            url: recipe.url,
            image_url: recipe.image_url,
            rating: recipe.rating.unwrap_or_default(),
            n_used,
            total_ingredients,
            score,
        }
    }
}
