use std::cmp::Ordering;
use std::collections::HashSet;

use tracing::debug;

use crate::catalog::{Ingredient, IngredientCatalog};

use super::inflect::counterpart;
use super::query::SearchQuery;
use super::similarity::Similarity;

/// A catalog ingredient matched by a query, with its similarity score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit<'a> {
    pub ingredient: &'a Ingredient,
    /// Similarity to the query in `[0, 100]`.
    pub score: f64,
}

/// Resolves free-text queries to ranked catalog ingredients.
///
/// Read-only over the catalog; any number of searches may run concurrently.
pub struct IngredientSearchEngine<'a> {
    catalog: &'a IngredientCatalog,
    scorer: &'a dyn Similarity,
}

impl std::fmt::Debug for IngredientSearchEngine<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IngredientSearchEngine")
            .field("catalog_len", &self.catalog.len())
            .finish()
    }
}

impl<'a> IngredientSearchEngine<'a> {
    pub fn new(catalog: &'a IngredientCatalog, scorer: &'a dyn Similarity) -> Self {
        Self { catalog, scorer }
    }

    /// Returns at most `limit` ingredients, best match first.
    ///
    /// Equal scores are ordered by name so results are reproducible.
    pub fn search(&self, query: &SearchQuery, limit: usize) -> Vec<SearchHit<'a>> {
        if limit == 0 {
            return Vec::new();
        }

        let candidates = if query.is_multi_token() {
            self.token_candidates(query)
        } else {
            self.substring_candidates(query)
        };

        let mut hits: Vec<SearchHit<'a>> = candidates
            .into_iter()
            .map(|ingredient| SearchHit {
                ingredient,
                score: self.scorer.similarity(query.as_str(), &ingredient.name),
            })
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.ingredient.name.cmp(&b.ingredient.name))
        });
        hits.truncate(limit);

        debug!(
            query = %query,
            multi_token = query.is_multi_token(),
            returned = hits.len(),
            "Ingredient search complete"
        );

        hits
    }

    /// Ingredients sharing at least one token with the query's tokens or their inflections.
    fn token_candidates(&self, query: &SearchQuery) -> Vec<&'a Ingredient> {
        let wanted: HashSet<String> = query
            .tokens()
            .flat_map(|token| [token.to_string(), counterpart(token)])
            .collect();

        self.catalog
            .iter_with_tokens()
            .filter(|(_, tokens)| !tokens.is_disjoint(&wanted))
            .map(|(ingredient, _)| ingredient)
            .collect()
    }

    /// Ingredients whose name contains the query or its inflection.
    fn substring_candidates(&self, query: &SearchQuery) -> Vec<&'a Ingredient> {
        let plain = query.as_str();
        let inflected = counterpart(plain);

        self.catalog
            .iter()
            .filter(|ingredient| {
                ingredient.name.contains(plain) || ingredient.name.contains(inflected.as_str())
            })
            .collect()
    }
}
