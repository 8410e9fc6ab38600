pub mod aggregate;
pub mod alternates;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod http;
pub mod lookup;
pub mod normalize;
pub mod search_index;
pub mod session;
pub mod types;
pub mod vocabulary;

pub use aggregate::{aggregate_search, partition_matches};
pub use alternates::AlternateNames;
pub use catalog::{CatalogClient, CocktailDbClient, FakeCatalog, POPULAR_COCKTAILS};
pub use config::{BarbackConfig, ConfigError};
pub use engine::Barback;
pub use error::{CatalogError, SearchError, TableError};
pub use http::{HttpClient, MockClient, MockResponse, ReqwestClient, ReqwestClientBuilder};
pub use lookup::lookup_ingredient;
pub use normalize::normalize_for_search;
pub use search_index::{filter_ingredients, merge_popular_ingredients, popular_ingredients};
pub use session::{SearchSession, SearchTicket};
pub use types::{
    Cocktail, Difficulty, IngredientRef, MatchPartition, MatchResult, RecipeSummary,
    SelectedIngredient,
};
pub use vocabulary::Vocabulary;
