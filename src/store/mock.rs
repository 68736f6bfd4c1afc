use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::RwLock;

use super::client::RecipeStore;
use super::error::StoreError;
use super::model::{CoverageQuery, RecipeCoverage, RecipeId, RecipeRecord};
use crate::catalog::IngredientId;

/// In-memory recipe corpus with the same aggregation semantics as the SQLite store.
#[derive(Default)]
pub struct MockRecipeStore {
    recipes: RwLock<BTreeMap<RecipeId, RecipeRecord>>,
    associations: RwLock<BTreeMap<RecipeId, BTreeSet<IngredientId>>>,
    failing: AtomicBool,
    aggregations: AtomicUsize,
}

impl MockRecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `recipe` together with its ingredient ids.
    pub fn insert_recipe<I>(&self, recipe: RecipeRecord, ingredients: I)
    where
        I: IntoIterator<Item = IngredientId>,
    {
        let id = recipe.recipe_id;
        self.recipes.write().insert(id, recipe);
        self.associations
            .write()
            .entry(id)
            .or_default()
            .extend(ingredients);
    }

    /// Makes every subsequent call fail with [`StoreError::Unavailable`].
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of aggregation calls received (including failed ones).
    pub fn aggregation_count(&self) -> usize {
        self.aggregations.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable {
                message: "mock store set to fail".to_string(),
            });
        }
        Ok(())
    }
}

impl RecipeStore for MockRecipeStore {
    async fn aggregate_recipe_coverage(
        &self,
        query: &CoverageQuery,
    ) -> Result<Vec<RecipeCoverage>, StoreError> {
        self.aggregations.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        let recipes = self.recipes.read();
        let associations = self.associations.read();

        let rows = associations
            .iter()
            .filter_map(|(recipe_id, ingredients)| {
                let recipe = recipes.get(recipe_id)?;
                let n_used = ingredients
                    .iter()
                    .filter(|id| query.matched_ids.contains(id))
                    .count() as u32;
                if n_used == 0 {
                    return None;
                }
                let total_score = ingredients.iter().map(|&id| query.contribution(id)).sum();

                Some(RecipeCoverage {
                    recipe: recipe.clone(),
                    n_used,
                    total_ingredients: ingredients.len() as u32,
                    total_score,
                })
            })
            .collect();

        Ok(rows)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.check_available()
    }
}
