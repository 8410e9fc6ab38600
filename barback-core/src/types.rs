use serde::{Deserialize, Serialize};

use crate::vocabulary::Vocabulary;

/// An ingredient as the catalog names it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IngredientRef {
    pub id: String,
    /// Canonical (catalog) name.
    pub name: String,
}

impl IngredientRef {
    /// Catalog ingredients are identified by their name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
        }
    }

    /// Identity comparison: names match case-insensitively.
    pub fn same_as(&self, other: &IngredientRef) -> bool {
        self.name.to_lowercase() == other.name.to_lowercase()
    }

    /// Image URL on TheCocktailDB for this ingredient.
    pub fn thumbnail_url(&self) -> String {
        let encoded: String =
            url::form_urlencoded::byte_serialize(self.name.as_bytes()).collect();
        // Path segments use %20, not +.
        format!(
            "https://www.thecocktaildb.com/images/ingredients/{}-Medium.png",
            encoded.replace('+', "%20")
        )
    }
}

/// An ingredient the user picked, with its display name resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedIngredient {
    pub canonical_name: String,
    pub display_name: String,
}

impl SelectedIngredient {
    pub fn new(ingredient: &IngredientRef, vocabulary: &Vocabulary) -> Self {
        Self::from_name(&ingredient.name, vocabulary)
    }

    pub fn from_name(canonical_name: &str, vocabulary: &Vocabulary) -> Self {
        Self {
            canonical_name: canonical_name.to_string(),
            display_name: vocabulary.translate_ingredient(canonical_name).to_string(),
        }
    }

    pub fn same_ingredient(&self, canonical_name: &str) -> bool {
        self.canonical_name.to_lowercase() == canonical_name.to_lowercase()
    }
}

/// A recipe as returned by an ingredient filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: String,
    pub name: String,
    pub thumbnail: Option<String>,
}

impl RecipeSummary {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            thumbnail: None,
        }
    }

    pub fn with_thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail = Some(url.into());
        self
    }

    /// Small preview variant of the thumbnail.
    pub fn preview_thumbnail(&self) -> Option<String> {
        self.thumbnail.as_ref().map(|url| format!("{}/preview", url))
    }
}

/// How well one recipe is covered by the current selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub recipe: RecipeSummary,
    pub match_count: usize,
    pub total_selected: usize,
    /// Canonical names of the selected ingredients this recipe uses, in selection order.
    pub matched_ingredients: Vec<String>,
}

impl MatchResult {
    pub fn is_full_match(&self) -> bool {
        self.match_count == self.total_selected
    }

    pub fn match_percentage(&self) -> f64 {
        if self.total_selected == 0 {
            return 0.0;
        }
        self.match_count as f64 / self.total_selected as f64 * 100.0
    }
}

/// Search results split into full and partial matches, order preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchPartition {
    pub full: Vec<MatchResult>,
    pub partial: Vec<MatchResult>,
}

/// Rough effort label derived from the ingredient count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn from_ingredient_count(count: usize) -> Self {
        match count {
            1..=3 => Difficulty::Easy,
            4..=6 => Difficulty::Medium,
            _ => Difficulty::Hard,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// Full recipe detail from a lookup by id or a random pick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cocktail {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub glass: Option<String>,
    pub alcoholic: Option<String>,
    pub instructions: Option<String>,
    pub thumbnail: Option<String>,
    /// `(ingredient, measure)` pairs in recipe order; measure may be empty.
    pub ingredients: Vec<(String, String)>,
}

impl Cocktail {
    pub fn ingredients_with_measures(&self) -> &[(String, String)] {
        &self.ingredients
    }

    pub fn difficulty(&self) -> Difficulty {
        Difficulty::from_ingredient_count(self.ingredients.len())
    }

    pub fn is_alcoholic(&self) -> bool {
        self.alcoholic
            .as_deref()
            .map(|a| a.eq_ignore_ascii_case("alcoholic"))
            .unwrap_or(false)
    }

    pub fn summary(&self) -> RecipeSummary {
        RecipeSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            thumbnail: self.thumbnail.clone(),
        }
    }
}
