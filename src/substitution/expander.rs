use std::collections::BTreeSet;

use tracing::warn;

use crate::catalog::{IngredientCatalog, IngredientId, SubstitutionMap};

/// A data-consistency fault found during expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpansionFault {
    /// A chosen id is not in the catalog, so its substitutes could not be looked up.
    UnknownIngredient { id: IngredientId },
    /// A substitute name has no catalog entry.
    UnresolvedSubstitute {
        ingredient: String,
        substitute: String,
    },
}

/// Result of expanding a chosen set, plus any faults that were skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expansion {
    pub ids: BTreeSet<IngredientId>,
    pub faults: Vec<ExpansionFault>,
}

/// Augments a chosen ingredient set with direct (one-hop) substitutes.
#[derive(Debug, Clone, Copy)]
pub struct SubstitutionExpander<'a> {
    catalog: &'a IngredientCatalog,
    substitutions: &'a SubstitutionMap,
}

impl<'a> SubstitutionExpander<'a> {
    pub fn new(catalog: &'a IngredientCatalog, substitutions: &'a SubstitutionMap) -> Self {
        Self {
            catalog,
            substitutions,
        }
    }

    /// `chosen` ∪ the ids of each chosen ingredient's direct substitutes.
    pub fn expand(&self, chosen: &BTreeSet<IngredientId>) -> BTreeSet<IngredientId> {
        self.expand_with_report(chosen).ids
    }

    /// Like [`expand`](Self::expand), also returning the faults that were logged.
    ///
    /// Faults never fail the expansion: unknown chosen ids stay in the result with no
    /// substitutes, and unresolvable substitute names are left out.
    pub fn expand_with_report(&self, chosen: &BTreeSet<IngredientId>) -> Expansion {
        let mut expansion = Expansion {
            ids: chosen.clone(),
            faults: Vec::new(),
        };

        for &id in chosen {
            let Some(name) = self.catalog.name(id) else {
                warn!(ingredient_id = id, "Chosen ingredient is not in the catalog");
                expansion
                    .faults
                    .push(ExpansionFault::UnknownIngredient { id });
                continue;
            };

            for substitute in self.substitutions.substitutes(name) {
                match self.catalog.id(substitute) {
                    Some(substitute_id) => {
                        expansion.ids.insert(substitute_id);
                    }
                    None => {
                        warn!(
                            ingredient = name,
                            substitute = substitute.as_str(),
                            "Substitute has no catalog entry, skipping"
                        );
                        expansion.faults.push(ExpansionFault::UnresolvedSubstitute {
                            ingredient: name.to_string(),
                            substitute: substitute.clone(),
                        });
                    }
                }
            }
        }

        expansion
    }
}
