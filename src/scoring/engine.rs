use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

use tracing::{debug, error};

use crate::catalog::IngredientId;
use crate::store::{CoverageQuery, RecipeCoverage, RecipeStore};

use super::error::ScoringError;
use super::policy::ScoringPolicy;
use super::types::RecipeSummary;

/// Ranks the recipe corpus by how well an expanded ingredient set covers each recipe.
pub struct RecipeScoringEngine<S> {
    store: S,
    policy: ScoringPolicy,
}

impl<S> std::fmt::Debug for RecipeScoringEngine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecipeScoringEngine")
            .field("policy", &self.policy)
            .finish()
    }
}

impl<S: RecipeStore> RecipeScoringEngine<S> {
    /// Creates an engine after validating `policy`.
    pub fn new(store: S, policy: ScoringPolicy) -> Result<Self, ScoringError> {
        policy.validate()?;
        Ok(Self { store, policy })
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Aggregates coverage through the store, then filters, ranks, truncates and
    /// de-duplicates by title.
    ///
    /// An empty `expanded_ids` is rejected before the store is contacted. Store failures
    /// surface as [`ScoringError::Store`], never as an empty ranking.
    pub async fn score_and_rank(
        &self,
        expanded_ids: &BTreeSet<IngredientId>,
        pantry_ids: &BTreeSet<IngredientId>,
        limit: usize,
    ) -> Result<Vec<RecipeSummary>, ScoringError> {
        if expanded_ids.is_empty() {
            return Err(ScoringError::EmptyIngredientSet);
        }

        let query = CoverageQuery {
            matched_ids: expanded_ids.clone(),
            pantry_ids: pantry_ids.clone(),
            alpha: self.policy.alpha,
        };

        let rows = self
            .store
            .aggregate_recipe_coverage(&query)
            .await
            .inspect_err(|e| error!(error = %e, "Coverage aggregation failed"))?;

        let aggregated = rows.len();
        let ranked = rank(rows, &self.policy, limit);

        debug!(
            matched = expanded_ids.len(),
            aggregated,
            returned = ranked.len(),
            formula = %self.policy.formula,
            "Recipes ranked"
        );

        Ok(ranked)
    }
}

/// Applies eligibility, ranking, truncation to `limit`, and title de-duplication.
///
/// Order: primary key descending, weighted rating descending (missing last), then
/// recipe id ascending so equal rows always come out the same way.
pub fn rank(rows: Vec<RecipeCoverage>, policy: &ScoringPolicy, limit: usize) -> Vec<RecipeSummary> {
    let mut scored: Vec<(f64, RecipeCoverage)> = rows
        .into_iter()
        .filter(|row| policy.is_eligible(row))
        .map(|row| (policy.formula.key(&row), row))
        .collect();

    scored.sort_by(|(key_a, a), (key_b, b)| {
        key_b
            .partial_cmp(key_a)
            .unwrap_or(Ordering::Equal)
            .then_with(|| compare_weighted_rating(a, b))
            .then_with(|| a.recipe.recipe_id.cmp(&b.recipe.recipe_id))
    });
    scored.truncate(limit);

    let mut seen_titles = HashSet::new();
    scored
        .into_iter()
        .filter(|(_, row)| seen_titles.insert(row.recipe.title.clone()))
        .map(|(key, row)| RecipeSummary::from_coverage(row, key))
        .collect()
}

fn compare_weighted_rating(a: &RecipeCoverage, b: &RecipeCoverage) -> Ordering {
    match (a.recipe.weighted_rating, b.recipe.weighted_rating) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
