//! Recipe catalog abstraction.
//!
//! The matching engine only needs two questions answered: which recipes use
//! an ingredient, and which ingredients exist. [`CocktailDbClient`] answers
//! them from TheCocktailDB; [`FakeCatalog`] answers them from memory.

mod cocktaildb;
mod fake;

pub use cocktaildb::{CocktailDbClient, DEFAULT_BASE_URL, POPULAR_COCKTAILS};
pub use fake::FakeCatalog;

use async_trait::async_trait;

use crate::error::CatalogError;
use crate::types::{IngredientRef, RecipeSummary};

/// Source of recipes, queried by ingredient.
///
/// Implementations must be thread-safe; the aggregator queries one
/// ingredient per task.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Recipes the catalog files under `name`. Unknown names give an empty list.
    async fn lookup_by_ingredient(&self, name: &str) -> Result<Vec<RecipeSummary>, CatalogError>;

    /// Every ingredient the catalog knows about.
    async fn list_all_ingredients(&self) -> Result<Vec<IngredientRef>, CatalogError>;
}
