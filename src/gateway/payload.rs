//! Wire types. Field names follow what the web frontend already consumes.

use serde::{Deserialize, Serialize};

use crate::catalog::{Ingredient, IngredientId};
use crate::scoring::RecipeSummary;
use crate::store::RecipeId;

#[derive(Deserialize, Debug, Default)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct IngredientView {
    pub id: IngredientId,
    pub name: String,
}

impl From<&Ingredient> for IngredientView {
    fn from(ingredient: &Ingredient) -> Self {
        Self {
            id: ingredient.id,
            name: ingredient.name.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct IngredientsResponse {
    pub ingredients: Vec<IngredientView>,
}

impl<'a> FromIterator<&'a Ingredient> for IngredientsResponse {
    fn from_iter<I: IntoIterator<Item = &'a Ingredient>>(iter: I) -> Self {
        Self {
            ingredients: iter.into_iter().map(IngredientView::from).collect(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IngredientIdsRequest {
    pub ingredient_ids: Vec<IngredientId>,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IngredientIdsResponse {
    pub ingredient_ids: Vec<IngredientId>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecipeView {
    pub id: RecipeId,
    pub recipe_name: String,
    pub recipe_url: String,
    pub image_url: Option<String>,
    pub avg_rating: f64,
    pub n_ingredients_used: u32,
    pub total_ingredients: u32,
}

impl From<RecipeSummary> for RecipeView {
    fn from(summary: RecipeSummary) -> Self {
        Self {
            id: summary.id,
            recipe_name: summary.title,
            recipe_url: summary.url,
            image_url: summary.image_url,
            avg_rating: summary.rating,
            n_ingredients_used: summary.n_used,
            total_ingredients: summary.total_ingredients,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RecipesResponse {
    pub recipes: Vec<RecipeView>,
}
