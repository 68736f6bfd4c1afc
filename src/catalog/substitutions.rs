use std::collections::HashMap;

use super::ingredient::normalize_name;

/// Ingredient name → ordered substitute names.
///
/// Neither symmetric nor transitive. A name with no entry has no substitutes.
#[derive(Debug, Clone, Default)]
pub struct SubstitutionMap {
    entries: HashMap<String, Vec<String>>,
}

impl SubstitutionMap {
    /// Builds the map, normalizing keys and values like catalog names.
    ///
    /// Later entries for the same normalized key are appended; empty names are skipped.
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: IntoIterator,
        V::Item: AsRef<str>,
    {
        let mut map: HashMap<String, Vec<String>> = HashMap::new();

        for (key, substitutes) in entries {
            let key = normalize_name(key.as_ref());
            if key.is_empty() {
                continue;
            }

            let slot = map.entry(key).or_default();
            for substitute in substitutes {
                let substitute = normalize_name(substitute.as_ref());
                if !substitute.is_empty() {
                    slot.push(substitute);
                }
            }
        }

        Self { entries: map }
    }

    /// Substitutes for `name` (empty if none).
    pub fn substitutes(&self, name: &str) -> &[String] {
        self.entries.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of ingredients that have substitute lists.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
