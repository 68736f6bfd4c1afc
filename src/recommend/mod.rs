//! Recommendation facade.
//!
//! [`Recommender`] wires the search, substitution and scoring engines over one set of
//! immutable [`Catalogs`]. Search and scoring never talk to each other; callers pass
//! ingredient ids between them.


use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::debug;

use crate::catalog::{Catalogs, Ingredient, IngredientId};
use crate::scoring::{RecipeScoringEngine, RecipeSummary, ScoringError, ScoringPolicy};
use crate::search::{IngredientSearchEngine, SearchQuery, Similarity, TokenSortRatio};
use crate::store::{RecipeStore, StoreError};
use crate::substitution::SubstitutionExpander;

/// Entry point for the three recommendation operations.
pub struct Recommender<S> {
    catalogs: Arc<Catalogs>,
    scorer: Box<dyn Similarity>,
    scoring: RecipeScoringEngine<S>,
}

impl<S> std::fmt::Debug for Recommender<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recommender")
            .field("ingredients", &self.catalogs.ingredients.len())
            .field("pantry", &self.catalogs.pantry.len())
            .field("scoring", &self.scoring)
            .finish()
    }
}

impl<S: RecipeStore> Recommender<S> {
    /// Builds a recommender using [`TokenSortRatio`] for search.
    pub fn new(
        catalogs: Arc<Catalogs>,
        store: S,
        policy: ScoringPolicy,
    ) -> Result<Self, ScoringError> {
        Ok(Self {
            catalogs,
            scorer: Box::new(TokenSortRatio::new()),
            scoring: RecipeScoringEngine::new(store, policy)?,
        })
    }

    /// Replaces the search similarity scorer.
    pub fn with_scorer(mut self, scorer: impl Similarity + 'static) -> Self {
        self.scorer = Box::new(scorer);
        self
    }

    pub fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }

    pub fn policy(&self) -> &ScoringPolicy {
        self.scoring.policy()
    }

    pub fn store(&self) -> &S {
        self.scoring.store()
    }

    /// Ranked catalog ingredients for `query`, at most `limit`.
    pub fn search(&self, query: &SearchQuery, limit: usize) -> Vec<Ingredient> {
        IngredientSearchEngine::new(&self.catalogs.ingredients, self.scorer.as_ref())
            .search(query, limit)
            .into_iter()
            .map(|hit| hit.ingredient.clone())
            .collect()
    }

    /// The chosen ids plus their direct substitutes, sorted and de-duplicated.
    pub fn resolve_substitutes(&self, chosen: &[IngredientId]) -> Vec<IngredientId> {
        let chosen: BTreeSet<IngredientId> = chosen.iter().copied().collect();
        self.expander().expand(&chosen).into_iter().collect()
    }

    /// Expands `chosen` and ranks recipes against it, discounting pantry staples.
    pub async fn rank_recipes(
        &self,
        chosen: &[IngredientId],
        limit: usize,
    ) -> Result<Vec<RecipeSummary>, ScoringError> {
        let chosen: BTreeSet<IngredientId> = chosen.iter().copied().collect();
        if chosen.is_empty() {
            return Err(ScoringError::EmptyIngredientSet);
        }

        let expanded = self.expander().expand(&chosen);
        debug!(
            chosen = chosen.len(),
            expanded = expanded.len(),
            "Chosen ingredients expanded"
        );

        self.scoring
            .score_and_rank(&expanded, self.catalogs.pantry.ids(), limit)
            .await
    }

    /// Pantry staples in load order, for pre-selection.
    pub fn pantry(&self) -> Vec<Ingredient> {
        self.catalogs.pantry.presets().to_vec()
    }

    /// Probes the recipe store.
    pub async fn health_check(&self) -> Result<(), StoreError> {
        self.scoring.store().health_check().await
    }

    fn expander(&self) -> SubstitutionExpander<'_> {
        SubstitutionExpander::new(
            &self.catalogs.ingredients,
            &self.catalogs.substitutions,
        )
    }
}
