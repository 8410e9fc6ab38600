//! In-memory catalog for testing.
//!
//! Answers from registered recipes and records every query, so tests can
//! assert both what came back and what was asked.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use super::CatalogClient;
use crate::error::CatalogError;
use crate::types::{IngredientRef, RecipeSummary};

#[derive(Debug, Default)]
pub struct FakeCatalog {
    /// Lowercased ingredient name -> recipes filed under it
    recipes: HashMap<String, Vec<RecipeSummary>>,
    /// Lowercased ingredient name -> error to return
    failures: HashMap<String, CatalogError>,
    /// Lowercased ingredient name -> how long the answer takes
    delays: HashMap<String, Duration>,
    ingredients: Vec<IngredientRef>,
    list_failure: Option<CatalogError>,
    queries: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// File `recipe` under `ingredient`. Repeated calls append.
    pub fn with_recipe(mut self, ingredient: &str, recipe: RecipeSummary) -> Self {
        self.recipes
            .entry(ingredient.to_lowercase())
            .or_default()
            .push(recipe);
        self
    }

    pub fn with_recipes(self, ingredient: &str, recipes: &[RecipeSummary]) -> Self {
        recipes
            .iter()
            .cloned()
            .fold(self, |catalog, recipe| catalog.with_recipe(ingredient, recipe))
    }

    /// Make queries for `ingredient` fail.
    pub fn with_failure(mut self, ingredient: &str, error: CatalogError) -> Self {
        self.failures.insert(ingredient.to_lowercase(), error);
        self
    }

    /// Hold answers for `ingredient` back by `delay`.
    pub fn with_delay(mut self, ingredient: &str, delay: Duration) -> Self {
        self.delays.insert(ingredient.to_lowercase(), delay);
        self
    }

    pub fn with_ingredients(mut self, names: &[&str]) -> Self {
        self.ingredients = names.iter().map(|n| IngredientRef::new(*n)).collect();
        self
    }

    pub fn with_list_failure(mut self, error: CatalogError) -> Self {
        self.list_failure = Some(error);
        self
    }

    /// Ingredient names queried so far, in call order.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().map(|q| q.clone()).unwrap_or_default()
    }

    pub fn query_count(&self) -> usize {
        self.queries.lock().map(|q| q.len()).unwrap_or(0)
    }
}

#[async_trait]
impl CatalogClient for FakeCatalog {
    async fn lookup_by_ingredient(&self, name: &str) -> Result<Vec<RecipeSummary>, CatalogError> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(name.to_string());
        }

        let key = name.to_lowercase();
        if let Some(delay) = self.delays.get(&key) {
            tokio::time::sleep(*delay).await;
        }
        if let Some(error) = self.failures.get(&key) {
            return Err(error.clone());
        }
        Ok(self.recipes.get(&key).cloned().unwrap_or_default())
    }

    async fn list_all_ingredients(&self) -> Result<Vec<IngredientRef>, CatalogError> {
        match &self.list_failure {
            Some(error) => Err(error.clone()),
            None => Ok(self.ingredients.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fake_catalog_answers_case_insensitively() {
        let catalog = FakeCatalog::new()
            .with_recipe("Lime", RecipeSummary::new("1", "Mojito"))
            .with_failure("Gin", CatalogError::Network("offline".to_string()));

        assert_eq!(catalog.lookup_by_ingredient("lime").await.unwrap().len(), 1);
        assert!(catalog.lookup_by_ingredient("Rum").await.unwrap().is_empty());
        assert!(catalog.lookup_by_ingredient("GIN").await.is_err());
        assert_eq!(catalog.queries(), vec!["lime", "Rum", "GIN"]);
    }
}
