//! Ingredient picker filtering.

use serde::Deserialize;
use std::sync::LazyLock;

use crate::types::IngredientRef;
use crate::vocabulary::Vocabulary;

#[derive(Deserialize)]
struct PopularData {
    popular: Vec<String>,
}

/// Common bar ingredients the catalog's ingredient list is missing.
static POPULAR: LazyLock<Vec<String>> = LazyLock::new(|| {
    let json = include_str!("../../data/popular_ingredients.json");
    let data: PopularData =
        serde_json::from_str(json).expect("Failed to parse popular_ingredients.json");
    data.popular
});

pub fn popular_ingredients() -> &'static [String] {
    &POPULAR
}

/// Filter `catalog` by a free-text query in either vocabulary.
///
/// A blank query means the user cleared the search field: the whole
/// catalog comes back unchanged.
pub fn filter_ingredients(
    vocabulary: &Vocabulary,
    query: &str,
    catalog: &[IngredientRef],
) -> Vec<IngredientRef> {
    if query.trim().is_empty() {
        return catalog.to_vec();
    }
    vocabulary.search_ingredients(query, catalog)
}

/// Add the `popular` names missing from `catalog` (case-insensitive) and
/// sort everything by lowercased name.
pub fn merge_popular_ingredients(
    mut catalog: Vec<IngredientRef>,
    popular: &[String],
) -> Vec<IngredientRef> {
    for name in popular {
        let candidate = IngredientRef::new(name.as_str());
        if !catalog.iter().any(|known| known.same_as(&candidate)) {
            catalog.push(candidate);
        }
    }

    catalog.sort_by_cached_key(|i| i.name.to_lowercase());
    catalog
}
