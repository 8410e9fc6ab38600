//! Alternate catalog names for a single logical ingredient.
//!
//! The catalog files the same thing under several names ("Lime" and
//! "Lime juice", "Rum" and "Light rum"). Entries are authored one by one:
//! the table is neither symmetric nor transitively closed, and lookups
//! never try to make it so.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use crate::error::TableError;

#[derive(Deserialize)]
struct AlternatesData {
    alternates: HashMap<String, Vec<String>>,
}

static BUILTIN: LazyLock<AlternateNames> = LazyLock::new(|| {
    let json = include_str!("../../data/alternates.json");
    AlternateNames::from_json(json).expect("Failed to parse alternates.json")
});

/// Read-only synonym table keyed by lowercased ingredient name.
#[derive(Debug, Clone, Default)]
pub struct AlternateNames {
    entries: HashMap<String, Vec<String>>,
}

impl AlternateNames {
    /// Build a table from `(ingredient, alternates)` entries.
    ///
    /// Keys are lowercased; alternates keep their order with duplicates
    /// (case-insensitive) and self-references removed.
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<V>)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut table: HashMap<String, Vec<String>> = HashMap::new();

        for (name, alternates) in entries {
            let key = name.into().to_lowercase();
            let slot = table.entry(key.clone()).or_default();
            for alt in alternates {
                let alt = alt.into();
                let lower = alt.to_lowercase();
                if lower != key && !slot.iter().any(|a| a.to_lowercase() == lower) {
                    slot.push(alt);
                }
            }
        }

        Self { entries: table }
    }

    /// Parse `{"alternates": {"lime": ["Lime juice"], ...}}`.
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let data: AlternatesData = serde_json::from_str(json)?;
        Ok(Self::new(data.alternates))
    }

    pub fn from_path(path: &Path) -> Result<Self, TableError> {
        let json = std::fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// The built-in table for TheCocktailDB ingredient names.
    pub fn builtin() -> &'static AlternateNames {
        &BUILTIN
    }

    /// Alternate query strings for `ingredient`; empty when none are known.
    pub fn expand(&self, ingredient: &str) -> &[String] {
        self.entries
            .get(&ingredient.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_expansions() {
        let alts = AlternateNames::builtin();
        assert_eq!(alts.expand("Lime"), &["Lime juice".to_string()]);
        assert_eq!(
            alts.expand("rum"),
            &[
                "Light rum".to_string(),
                "White rum".to_string(),
                "Dark rum".to_string()
            ]
        );
        assert!(alts.expand("Campari").is_empty());
    }

    #[test]
    fn test_table_is_not_symmetric() {
        let alts = AlternateNames::builtin();
        // "vodka" lists "Absolut Vodka" but not the other way round.
        assert_eq!(alts.expand("vodka"), &["Absolut Vodka".to_string()]);
        assert!(alts.expand("Absolut Vodka").is_empty());
        // "dark rum" only points back at "Rum", never at its siblings.
        assert_eq!(alts.expand("Dark Rum"), &["Rum".to_string()]);
    }

    #[test]
    fn test_new_dedupes_and_drops_self_references() {
        let alts = AlternateNames::new(vec![(
            "Soda",
            vec!["Soda water", "soda WATER", "Soda", "Club soda"],
        )]);
        assert_eq!(
            alts.expand("SODA"),
            &["Soda water".to_string(), "Club soda".to_string()]
        );
        assert_eq!(alts.len(), 1);
    }
}
