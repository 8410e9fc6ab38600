//! TheCocktailDB JSON API.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;

use super::CatalogClient;
use crate::error::CatalogError;
use crate::http::HttpClient;
use crate::types::{Cocktail, IngredientRef, RecipeSummary};

pub const DEFAULT_BASE_URL: &str = "https://www.thecocktaildb.com/api/json/v1/1";

/// Number of numbered ingredient/measure slots on a full drink record.
const INGREDIENT_SLOTS: usize = 15;

/// Drinks shown on the home screen, in display order.
pub const POPULAR_COCKTAILS: [&str; 6] = [
    "Margarita",
    "Mojito",
    "Cosmopolitan",
    "Mai Tai",
    "Pina Colada",
    "Long Island Iced Tea",
];

#[derive(Deserialize)]
struct DrinksEnvelope {
    #[serde(default)]
    drinks: Value,
}

#[derive(Deserialize)]
struct SummaryRecord {
    #[serde(rename = "idDrink")]
    id: String,
    #[serde(rename = "strDrink")]
    name: String,
    #[serde(rename = "strDrinkThumb")]
    thumbnail: Option<String>,
}

#[derive(Deserialize)]
struct IngredientRecord {
    #[serde(rename = "strIngredient1")]
    name: String,
}

/// Catalog client for TheCocktailDB.
pub struct CocktailDbClient {
    http: Arc<dyn HttpClient>,
    base_url: String,
    /// Suffix of a localized `strInstructions*` field to prefer, e.g. "DE".
    instructions_locale: Option<String>,
}

impl CocktailDbClient {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self::with_base_url(http, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(http: Arc<dyn HttpClient>, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            instructions_locale: None,
        }
    }

    /// Prefer `strInstructions<LOCALE>` over the English instructions when present.
    pub fn instructions_locale(mut self, locale: Option<String>) -> Self {
        self.instructions_locale = locale.map(|l| l.to_uppercase());
        self
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<String, CatalogError> {
        let base = format!("{}/{}", self.base_url, path);
        let url = if params.is_empty() {
            url::Url::parse(&base)
        } else {
            url::Url::parse_with_params(&base, params)
        };
        url.map(String::from)
            .map_err(|e| CatalogError::InvalidUrl(format!("{}: {}", base, e)))
    }

    async fn fetch_drinks<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>, CatalogError> {
        let body = self.http.get_text(url).await?;
        parse_drinks(&body)
    }

    /// Full recipe by catalog id; `None` when the id is unknown.
    pub async fn lookup_cocktail(&self, id: &str) -> Result<Option<Cocktail>, CatalogError> {
        let url = self.endpoint("lookup.php", &[("i", id)])?;
        let records: Vec<Map<String, Value>> = self.fetch_drinks(&url).await?;
        records
            .into_iter()
            .next()
            .map(|r| self.cocktail_from_record(r))
            .transpose()
    }

    pub async fn random_cocktail(&self) -> Result<Option<Cocktail>, CatalogError> {
        let url = self.endpoint("random.php", &[])?;
        let records: Vec<Map<String, Value>> = self.fetch_drinks(&url).await?;
        records
            .into_iter()
            .next()
            .map(|r| self.cocktail_from_record(r))
            .transpose()
    }

    /// Full recipes whose name contains `name`.
    pub async fn search_by_name(&self, name: &str) -> Result<Vec<Cocktail>, CatalogError> {
        if name.trim().is_empty() {
            return Ok(Vec::new());
        }
        let url = self.endpoint("search.php", &[("s", name)])?;
        let records: Vec<Map<String, Value>> = self.fetch_drinks(&url).await?;
        records
            .into_iter()
            .map(|r| self.cocktail_from_record(r))
            .collect()
    }

    /// First name-search hit for each of [`POPULAR_COCKTAILS`].
    ///
    /// Best effort: a name that fails or finds nothing is logged and left out.
    pub async fn popular_cocktails(&self) -> Vec<Cocktail> {
        let mut cocktails = Vec::with_capacity(POPULAR_COCKTAILS.len());
        for name in POPULAR_COCKTAILS {
            match self.search_by_name(name).await {
                Ok(found) => match found.into_iter().next() {
                    Some(cocktail) => cocktails.push(cocktail),
                    None => tracing::warn!(name, "popular cocktail not found, skipping"),
                },
                Err(e) => {
                    tracing::warn!(
                        name,
                        error = %e,
                        "popular cocktail lookup failed, skipping"
                    );
                }
            }
        }
        cocktails
    }

    fn cocktail_from_record(&self, record: Map<String, Value>) -> Result<Cocktail, CatalogError> {
        let text = |key: &str| -> Option<String> {
            record
                .get(key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let id = text("idDrink")
            .ok_or_else(|| CatalogError::Decode("drink without idDrink".to_string()))?;
        let name = text("strDrink")
            .ok_or_else(|| CatalogError::Decode(format!("drink {} without strDrink", id)))?;

        let localized = self
            .instructions_locale
            .as_ref()
            .and_then(|locale| text(&format!("strInstructions{}", locale)));

        let ingredients = (1..=INGREDIENT_SLOTS)
            .filter_map(|slot| {
                let ingredient = text(&format!("strIngredient{}", slot))?;
                let measure = text(&format!("strMeasure{}", slot)).unwrap_or_default();
                Some((ingredient, measure))
            })
            .collect();

        Ok(Cocktail {
            id,
            name,
            category: text("strCategory"),
            glass: text("strGlass"),
            alcoholic: text("strAlcoholic"),
            instructions: localized.or_else(|| text("strInstructions")),
            thumbnail: text("strDrinkThumb"),
            ingredients,
        })
    }
}

#[async_trait]
impl CatalogClient for CocktailDbClient {
    async fn lookup_by_ingredient(&self, name: &str) -> Result<Vec<RecipeSummary>, CatalogError> {
        let url = self.endpoint("filter.php", &[("i", name)])?;
        tracing::debug!(ingredient = name, "catalog: filter by ingredient");
        let records: Vec<SummaryRecord> = self.fetch_drinks(&url).await?;
        Ok(records
            .into_iter()
            .map(|r| RecipeSummary {
                id: r.id,
                name: r.name,
                thumbnail: r.thumbnail,
            })
            .collect())
    }

    async fn list_all_ingredients(&self) -> Result<Vec<IngredientRef>, CatalogError> {
        let url = self.endpoint("list.php", &[("i", "list")])?;
        let records: Vec<IngredientRecord> = self.fetch_drinks(&url).await?;
        Ok(records
            .into_iter()
            .map(|r| IngredientRef::new(r.name.trim()))
            .filter(|i| !i.name.is_empty())
            .collect())
    }
}

/// Decode the `{"drinks": ...}` envelope.
///
/// The API signals "nothing found" several ways: an empty body,
/// `"drinks": null`, or a placeholder string such as `"no data found"`.
fn parse_drinks<T: DeserializeOwned>(body: &str) -> Result<Vec<T>, CatalogError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    let envelope: DrinksEnvelope = serde_json::from_str(body)?;
    match envelope.drinks {
        Value::Null | Value::String(_) => Ok(Vec::new()),
        drinks @ Value::Array(_) => Ok(serde_json::from_value(drinks)?),
        other => Err(CatalogError::Decode(format!(
            "unexpected drinks payload: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::MockClient;

    const BASE: &str = "https://catalog.test/api";

    fn client(mock: MockClient) -> CocktailDbClient {
        CocktailDbClient::with_base_url(Arc::new(mock), BASE)
    }

    #[test]
    fn test_parse_drinks_no_results() {
        assert!(parse_drinks::<SummaryRecord>("").unwrap().is_empty());
        assert!(parse_drinks::<SummaryRecord>(r#"{"drinks": null}"#).unwrap().is_empty());
        assert!(parse_drinks::<SummaryRecord>(r#"{"drinks": "no data found"}"#)
            .unwrap()
            .is_empty());
        assert!(parse_drinks::<SummaryRecord>("{}").unwrap().is_empty());
    }

    #[test]
    fn test_parse_drinks_malformed() {
        assert!(matches!(
            parse_drinks::<SummaryRecord>("<html>"),
            Err(CatalogError::Decode(_))
        ));
        assert!(matches!(
            parse_drinks::<SummaryRecord>(r#"{"drinks": [{"strDrink": "x"}]}"#),
            Err(CatalogError::Decode(_))
        ));
        assert!(matches!(
            parse_drinks::<SummaryRecord>(r#"{"drinks": 42}"#),
            Err(CatalogError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_lookup_by_ingredient_encodes_query() {
        let mock = MockClient::new().with_body(
            "https://catalog.test/api/filter.php?i=Lime+juice",
            r#"{"drinks": [
                {"strDrink": "Daiquiri", "strDrinkThumb": "https://img/d.jpg", "idDrink": "11006"}
            ]}"#,
        );
        let recipes = client(mock).lookup_by_ingredient("Lime juice").await.unwrap();
        assert_eq!(
            recipes,
            vec![RecipeSummary::new("11006", "Daiquiri").with_thumbnail("https://img/d.jpg")]
        );
    }

    #[tokio::test]
    async fn test_lookup_by_ingredient_propagates_status() {
        let mock = MockClient::new().with_status("https://catalog.test/api/filter.php?i=Gin", 502);
        assert_eq!(
            client(mock).lookup_by_ingredient("Gin").await,
            Err(CatalogError::Upstream { status: 502 })
        );
    }

    #[tokio::test]
    async fn test_list_all_ingredients() {
        let mock = MockClient::new().with_body(
            "https://catalog.test/api/list.php?i=list",
            r#"{"drinks": [
                {"strIngredient1": "Light rum"},
                {"strIngredient1": " "},
                {"strIngredient1": "Gin"}
            ]}"#,
        );
        let ingredients = client(mock).list_all_ingredients().await.unwrap();
        assert_eq!(
            ingredients,
            vec![IngredientRef::new("Light rum"), IngredientRef::new("Gin")]
        );
    }

    #[tokio::test]
    async fn test_lookup_cocktail_reads_numbered_slots() {
        let body = r#"{"drinks": [{
            "idDrink": "11000", "strDrink": "Mojito", "strCategory": "Cocktail",
            "strGlass": "Highball glass", "strAlcoholic": "Alcoholic",
            "strInstructions": "Muddle mint.", "strInstructionsDE": "Minze zerdrücken.",
            "strDrinkThumb": null,
            "strIngredient1": "Light rum", "strMeasure1": "2-3 oz ",
            "strIngredient2": "Lime", "strMeasure2": null,
            "strIngredient3": "", "strMeasure3": "1 tsp",
            "strIngredient4": "Mint", "strMeasure4": "2-4 ",
            "strIngredient5": null
        }]}"#;
        let mock = MockClient::new().with_body("https://catalog.test/api/lookup.php?i=11000", body);
        let cocktail = client(mock)
            .instructions_locale(Some("de".to_string()))
            .lookup_cocktail("11000")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(cocktail.name, "Mojito");
        assert!(cocktail.is_alcoholic());
        assert_eq!(cocktail.instructions.as_deref(), Some("Minze zerdrücken."));
        assert_eq!(cocktail.thumbnail, None);
        assert_eq!(
            cocktail.ingredients_with_measures(),
            &[
                ("Light rum".to_string(), "2-3 oz".to_string()),
                ("Lime".to_string(), String::new()),
                ("Mint".to_string(), "2-4".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_lookup_cocktail_unknown_id() {
        let mock = MockClient::new().with_body(
            "https://catalog.test/api/lookup.php?i=1",
            r#"{"drinks": null}"#,
        );
        assert_eq!(client(mock).lookup_cocktail("1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_popular_cocktails_skips_failed_and_missing_names() {
        let search = |name: &str| {
            url::Url::parse_with_params(&format!("{}/search.php", BASE), &[("s", name)])
                .unwrap()
                .to_string()
        };
        let drink = |id: &str, name: &str| {
            format!(
                r#"{{"drinks": [{{"idDrink": "{}", "strDrink": "{}", "strIngredient1": "Gin"}}]}}"#,
                id, name
            )
        };

        let mut mock = MockClient::new()
            .with_status(&search("Mojito"), 500)
            .with_body(&search("Mai Tai"), r#"{"drinks": null}"#);
        for (id, name) in [
            ("11007", "Margarita"),
            ("17196", "Cosmopolitan"),
            ("17207", "Pina Colada"),
            ("17204", "Long Island Iced Tea"),
        ] {
            mock = mock.with_body(&search(name), &drink(id, name));
        }
        let mock = Arc::new(mock);

        let popular = CocktailDbClient::with_base_url(mock.clone(), BASE)
            .popular_cocktails()
            .await;
        let names: Vec<&str> = popular.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Margarita", "Cosmopolitan", "Pina Colada", "Long Island Iced Tea"]
        );
        assert_eq!(popular[0].ingredients_with_measures().len(), 1);
        assert_eq!(mock.requests().len(), POPULAR_COCKTAILS.len());
    }

    #[tokio::test]
    async fn test_search_by_blank_name_skips_network() {
        let mock = Arc::new(MockClient::new());
        let catalog = CocktailDbClient::with_base_url(mock.clone(), BASE);
        assert!(catalog.search_by_name("  ").await.unwrap().is_empty());
        assert!(mock.requests().is_empty());
    }
}
