use std::collections::BTreeSet;

use super::error::CatalogError;
use super::ingredient::{Ingredient, IngredientCatalog, IngredientId};

/// Ingredients treated as commonly available.
///
/// Pantry membership only discounts a match during scoring; it never decides
/// whether a recipe is a candidate.
#[derive(Debug, Clone, Default)]
pub struct PantrySet {
    ids: BTreeSet<IngredientId>,
    presets: Vec<Ingredient>,
}

impl PantrySet {
    /// Builds the set, checking every id against `catalog`.
    ///
    /// Presets keep the order of `ids`; repeated ids are kept once.
    pub fn new<I>(ids: I, catalog: &IngredientCatalog) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = IngredientId>,
    {
        let mut set = Self::default();

        for id in ids {
            let ingredient = catalog
                .get(id)
                .ok_or(CatalogError::UnknownPantryIngredient { id })?;

            if set.ids.insert(id) {
                set.presets.push(ingredient.clone());
            }
        }

        Ok(set)
    }

    #[inline]
    pub fn contains(&self, id: IngredientId) -> bool {
        self.ids.contains(&id)
    }

    #[inline]
    pub fn ids(&self) -> &BTreeSet<IngredientId> {
        &self.ids
    }

    /// Pantry ingredients with their names, for preset listings.
    #[inline]
    pub fn presets(&self) -> &[Ingredient] {
        &self.presets
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
