use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::error::CatalogError;

/// Canonical ingredient identifier.
pub type IngredientId = i64;

/// A canonical ingredient record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ingredient {
    /// Unique id.
    pub id: IngredientId,
    /// Normalized (trimmed, lowercase) name.
    pub name: String,
}

impl Ingredient {
    /// Creates a record, normalizing `name`.
    pub fn new(id: IngredientId, name: impl AsRef<str>) -> Self {
        Self {
            id,
            name: normalize_name(name.as_ref()),
        }
    }
}

/// Trims and lowercases an ingredient name.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Immutable bidirectional index over the ingredient catalog.
///
/// Ids and names are both unique; [`IngredientCatalog::new`] rejects duplicates
/// instead of overwriting. Entries keep their load order.
#[derive(Debug, Clone, Default)]
pub struct IngredientCatalog {
    entries: Vec<Ingredient>,
    tokens: Vec<HashSet<String>>,
    by_id: HashMap<IngredientId, usize>,
    by_name: HashMap<String, IngredientId>,
}

impl IngredientCatalog {
    /// Builds the index, failing on duplicate ids, duplicate names, or empty names.
    pub fn new<I>(ingredients: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = Ingredient>,
    {
        let mut catalog = Self::default();

        for ingredient in ingredients {
            let Ingredient { id, name } = ingredient;
            let name = normalize_name(&name);

            if name.is_empty() {
                return Err(CatalogError::EmptyName { id });
            }
            if catalog.by_id.contains_key(&id) {
                return Err(CatalogError::DuplicateId { id });
            }
            if let Some(&first) = catalog.by_name.get(&name) {
                return Err(CatalogError::DuplicateName {
                    name,
                    first,
                    second: id,
                });
            }

            let index = catalog.entries.len();
            catalog.tokens.push(tokenize(&name));
            catalog.by_id.insert(id, index);
            catalog.by_name.insert(name.clone(), id);
            catalog.entries.push(Ingredient { id, name });
        }

        Ok(catalog)
    }

    /// Number of ingredients.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the catalog has no ingredients.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// id → name.
    #[inline]
    pub fn name(&self, id: IngredientId) -> Option<&str> {
        self.by_id
            .get(&id)
            .map(|&index| self.entries[index].name.as_str())
    }

    /// name → id. `name` must already be normalized.
    #[inline]
    pub fn id(&self, name: &str) -> Option<IngredientId> {
        self.by_name.get(name).copied()
    }

    /// Returns `true` if `id` is in the catalog.
    #[inline]
    pub fn contains(&self, id: IngredientId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Looks up the full record for `id`.
    pub fn get(&self, id: IngredientId) -> Option<&Ingredient> {
        self.by_id.get(&id).map(|&index| &self.entries[index])
    }

    /// Iterates ingredients in load order.
    pub fn iter(&self) -> impl Iterator<Item = &Ingredient> {
        self.entries.iter()
    }

    /// Iterates ingredients paired with their token sets, in load order.
    pub fn iter_with_tokens(&self) -> impl Iterator<Item = (&Ingredient, &HashSet<String>)> {
        self.entries.iter().zip(self.tokens.iter())
    }

    /// Token set of `id`'s name.
    pub fn tokens(&self, id: IngredientId) -> Option<&HashSet<String>> {
        self.by_id.get(&id).map(|&index| &self.tokens[index])
    }
}

fn tokenize(name: &str) -> HashSet<String> {
    name.split_whitespace().map(str::to_string).collect()
}
