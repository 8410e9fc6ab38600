//! Canonical <-> display name translation for ingredients, categories and glasses.
//!
//! The catalog speaks English; users read the display vocabulary. Tables are
//! ordered `(canonical, display)` pairs so every fallback scan is reproducible.
//! The built-in Turkish tables are loaded from `data/vocabulary.json` at
//! compile time.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use crate::error::TableError;
use crate::normalize::normalize_for_search;
use crate::types::IngredientRef;

/// On-disk shape of a vocabulary file.
#[derive(Deserialize)]
struct VocabularyData {
    ingredients: Vec<(String, String)>,
    #[serde(default)]
    categories: Vec<(String, String)>,
    #[serde(default)]
    glasses: Vec<(String, String)>,
}

static BUILTIN: LazyLock<Vocabulary> = LazyLock::new(|| {
    let json = include_str!("../../data/vocabulary.json");
    Vocabulary::from_json(json).expect("Failed to parse vocabulary.json")
});

/// Read-only translation tables.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    ingredients: Vec<(String, String)>,
    /// Exact-match index into `ingredients`.
    ingredient_index: HashMap<String, usize>,
    /// Indices into `ingredients`, longest key first, ties in table order.
    /// Used for the substring fallback so "Ginger Syrup" finds "Ginger" before "Gin".
    substring_order: Vec<usize>,
    categories: HashMap<String, String>,
    glasses: HashMap<String, String>,
}

impl Vocabulary {
    pub fn new(
        ingredients: Vec<(String, String)>,
        categories: Vec<(String, String)>,
        glasses: Vec<(String, String)>,
    ) -> Self {
        let mut ingredient_index = HashMap::with_capacity(ingredients.len());
        for (i, (canonical, _)) in ingredients.iter().enumerate() {
            // First entry wins on duplicate keys.
            ingredient_index.entry(canonical.clone()).or_insert(i);
        }

        let mut substring_order: Vec<usize> = (0..ingredients.len()).collect();
        substring_order.sort_by_key(|&i| std::cmp::Reverse(ingredients[i].0.chars().count()));

        Self {
            ingredients,
            ingredient_index,
            substring_order,
            categories: first_wins(categories),
            glasses: first_wins(glasses),
        }
    }

    /// Parse a vocabulary from JSON:
    /// `{"ingredients": [["Lime", "Misket Limonu"], ...], "categories": [...], "glasses": [...]}`.
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let data: VocabularyData = serde_json::from_str(json)?;
        Ok(Self::new(data.ingredients, data.categories, data.glasses))
    }

    /// Load a vocabulary file, e.g. an alternate locale.
    pub fn from_path(path: &Path) -> Result<Self, TableError> {
        let json = std::fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// The built-in English -> Turkish tables.
    pub fn builtin() -> &'static Vocabulary {
        &BUILTIN
    }

    pub fn ingredient_count(&self) -> usize {
        self.ingredients.len()
    }

    /// Translate a canonical ingredient name for display.
    ///
    /// Tries an exact match, then a case-insensitive match, then the first
    /// table key contained in `canonical` (case-insensitive). Unknown names
    /// come back unchanged.
    pub fn translate_ingredient<'a>(&'a self, canonical: &'a str) -> &'a str {
        if let Some(&i) = self.ingredient_index.get(canonical) {
            return &self.ingredients[i].1;
        }

        let lower = canonical.to_lowercase();
        if let Some((_, display)) = self
            .ingredients
            .iter()
            .find(|(key, _)| key.to_lowercase() == lower)
        {
            return display;
        }

        for &i in &self.substring_order {
            let (key, display) = &self.ingredients[i];
            if lower.contains(&key.to_lowercase()) {
                return display;
            }
        }

        canonical
    }

    pub fn translate_category<'a>(&'a self, category: &'a str) -> &'a str {
        self.categories
            .get(category)
            .map(String::as_str)
            .unwrap_or(category)
    }

    pub fn translate_glass<'a>(&'a self, glass: &'a str) -> &'a str {
        self.glasses
            .get(glass)
            .map(String::as_str)
            .unwrap_or(glass)
    }

    /// Map a display name back to the canonical name the catalog understands.
    ///
    /// Several canonical names may share a display name ("Light Rum" and
    /// "White Rum" are both "Beyaz Rom"); the first in table order wins.
    pub fn reverse_ingredient<'a>(&'a self, display: &'a str) -> &'a str {
        let lower = display.to_lowercase();
        self.ingredients
            .iter()
            .find(|(_, value)| value.to_lowercase() == lower)
            .map(|(canonical, _)| canonical.as_str())
            .unwrap_or(display)
    }

    /// Keep the catalog entries whose canonical or display name contains
    /// `query`, ignoring case and Turkish diacritics. Input order is kept.
    pub fn search_ingredients(&self, query: &str, catalog: &[IngredientRef]) -> Vec<IngredientRef> {
        let query = normalize_for_search(query);

        catalog
            .iter()
            .filter(|ingredient| {
                normalize_for_search(&ingredient.name).contains(&query)
                    || normalize_for_search(self.translate_ingredient(&ingredient.name))
                        .contains(&query)
            })
            .cloned()
            .collect()
    }
}

fn first_wins(pairs: Vec<(String, String)>) -> HashMap<String, String> {
    let mut map = HashMap::with_capacity(pairs.len());
    for (key, value) in pairs {
        map.entry(key).or_insert(value);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn small() -> Vocabulary {
        Vocabulary::new(
            pairs(&[
                ("Gin", "Cin"),
                ("Lime", "Misket Limonu"),
                ("Ginger", "Zencefil"),
                ("Light Rum", "Beyaz Rom"),
                ("White Rum", "Beyaz Rom"),
            ]),
            pairs(&[("Cocktail", "Kokteyl")]),
            pairs(&[("Highball glass", "Highball Bardağı")]),
        )
    }

    #[test]
    fn test_builtin_tables_parse() {
        let vocab = Vocabulary::builtin();
        assert!(vocab.ingredient_count() > 100);
        assert_eq!(vocab.translate_ingredient("Vodka"), "Votka");
        assert_eq!(vocab.translate_category("Ordinary Drink"), "Klasik Kokteyl");
        assert_eq!(vocab.translate_glass("Copper Mug"), "Bakır Kupa");
    }

    #[test]
    fn test_translate_exact_and_case_insensitive() {
        let vocab = small();
        assert_eq!(vocab.translate_ingredient("Lime"), "Misket Limonu");
        assert_eq!(vocab.translate_ingredient("lime"), "Misket Limonu");
        assert_eq!(vocab.translate_ingredient("LIGHT RUM"), "Beyaz Rom");
    }

    #[test]
    fn test_translate_substring_fallback() {
        let vocab = small();
        assert_eq!(vocab.translate_ingredient("Fresh Lime Wedge"), "Misket Limonu");
        // Longer keys are tried first.
        assert_eq!(vocab.translate_ingredient("Ginger Syrup"), "Zencefil");
        assert_eq!(vocab.translate_ingredient("Sloe Gin"), "Cin");
    }

    #[test]
    fn test_translate_unknown_is_identity() {
        let vocab = small();
        assert_eq!(vocab.translate_ingredient("XYZ-unknown"), "XYZ-unknown");
        assert_eq!(vocab.translate_category("Beer"), "Beer");
        assert_eq!(vocab.translate_glass("Tiki mug"), "Tiki mug");
    }

    #[test]
    fn test_category_lookup_is_exact() {
        let vocab = small();
        assert_eq!(vocab.translate_category("Cocktail"), "Kokteyl");
        assert_eq!(vocab.translate_category("cocktail"), "cocktail");
    }

    #[test]
    fn test_reverse_lookup() {
        let vocab = small();
        assert_eq!(vocab.reverse_ingredient("misket limonu"), "Lime");
        assert_eq!(vocab.reverse_ingredient("Beyaz Rom"), "Light Rum");
        assert_eq!(vocab.reverse_ingredient("Bilinmeyen"), "Bilinmeyen");
    }

    #[test]
    fn test_search_matches_either_vocabulary() {
        let vocab = Vocabulary::builtin();
        let catalog = vec![
            IngredientRef::new("Sugar Syrup"),
            IngredientRef::new("Vodka"),
            IngredientRef::new("Simple Syrup"),
            IngredientRef::new("Strawberries"),
        ];

        let by_display = vocab.search_ingredients("seker", &catalog);
        let names: Vec<&str> = by_display.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Sugar Syrup", "Simple Syrup"]);

        let by_canonical = vocab.search_ingredients("VOD", &catalog);
        assert_eq!(by_canonical.len(), 1);
        assert_eq!(by_canonical[0].name, "Vodka");

        let with_diacritics = vocab.search_ingredients("Çilek", &catalog);
        assert_eq!(with_diacritics.len(), 1);
        assert_eq!(with_diacritics[0].name, "Strawberries");
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(Vocabulary::from_json("{\"ingredients\": 3}").is_err());
        let vocab = Vocabulary::from_json(r#"{"ingredients": [["Lime", "Lima"]]}"#).unwrap();
        assert_eq!(vocab.translate_ingredient("Lime"), "Lima");
        assert_eq!(vocab.translate_category("Shot"), "Shot");
    }
}
