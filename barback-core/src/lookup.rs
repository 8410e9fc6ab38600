//! Recipes for one logical ingredient, widened by its alternate names.

use std::collections::HashSet;

use crate::alternates::AlternateNames;
use crate::catalog::CatalogClient;
use crate::error::CatalogError;
use crate::types::RecipeSummary;

/// Query the catalog for `name` and each of its alternates.
///
/// The primary query must succeed. Alternate queries only widen recall, so
/// their failures are logged and skipped. Recipes are de-duplicated by id and
/// returned in first-seen order.
pub async fn lookup_ingredient(
    catalog: &dyn CatalogClient,
    alternates: &AlternateNames,
    name: &str,
) -> Result<Vec<RecipeSummary>, CatalogError> {
    if name.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut seen = HashSet::new();
    let mut recipes = Vec::new();

    for recipe in catalog.lookup_by_ingredient(name).await? {
        if seen.insert(recipe.id.clone()) {
            recipes.push(recipe);
        }
    }

    for alt in alternates.expand(name) {
        match catalog.lookup_by_ingredient(alt).await {
            Ok(found) => {
                for recipe in found {
                    if seen.insert(recipe.id.clone()) {
                        recipes.push(recipe);
                    }
                }
            }
            Err(e) => {
                tracing::warn!(
                    ingredient = name,
                    alternate = %alt,
                    error = %e,
                    "alternate lookup failed, skipping"
                );
            }
        }
    }

    tracing::debug!(ingredient = name, recipes = recipes.len(), "ingredient lookup complete");
    Ok(recipes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FakeCatalog;

    fn rum_alternates() -> AlternateNames {
        AlternateNames::new(vec![("rum", vec!["Light rum", "White rum"])])
    }

    fn ids(recipes: &[RecipeSummary]) -> Vec<&str> {
        recipes.iter().map(|r| r.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_merges_alternates_in_first_seen_order() {
        let catalog = FakeCatalog::new()
            .with_recipes(
                "Rum",
                &[RecipeSummary::new("1", "Daiquiri"), RecipeSummary::new("2", "Mai Tai")],
            )
            .with_recipes(
                "Light rum",
                &[RecipeSummary::new("2", "Mai Tai"), RecipeSummary::new("3", "Mojito")],
            )
            .with_recipes("White rum", &[RecipeSummary::new("4", "Cuba Libre")]);

        let recipes = lookup_ingredient(&catalog, &rum_alternates(), "Rum")
            .await
            .unwrap();
        assert_eq!(ids(&recipes), vec!["1", "2", "3", "4"]);
        assert_eq!(catalog.queries(), vec!["Rum", "Light rum", "White rum"]);
    }

    #[tokio::test]
    async fn test_alternate_failure_is_swallowed() {
        let catalog = FakeCatalog::new()
            .with_recipe("Rum", RecipeSummary::new("1", "Daiquiri"))
            .with_failure("Light rum", CatalogError::Upstream { status: 500 })
            .with_recipe("White rum", RecipeSummary::new("4", "Cuba Libre"));

        let recipes = lookup_ingredient(&catalog, &rum_alternates(), "rum")
            .await
            .unwrap();
        assert_eq!(ids(&recipes), vec!["1", "4"]);
    }

    #[tokio::test]
    async fn test_primary_failure_propagates() {
        let catalog = FakeCatalog::new()
            .with_failure("Rum", CatalogError::Network("offline".to_string()))
            .with_recipe("Light rum", RecipeSummary::new("3", "Mojito"));

        let result = lookup_ingredient(&catalog, &rum_alternates(), "Rum").await;
        assert_eq!(result, Err(CatalogError::Network("offline".to_string())));
        // Alternates are not tried once the primary query has failed.
        assert_eq!(catalog.query_count(), 1);
    }

    #[tokio::test]
    async fn test_blank_name_skips_catalog() {
        let catalog = FakeCatalog::new();
        let recipes = lookup_ingredient(&catalog, &AlternateNames::default(), " ")
            .await
            .unwrap();
        assert!(recipes.is_empty());
        assert_eq!(catalog.query_count(), 0);
    }
}
