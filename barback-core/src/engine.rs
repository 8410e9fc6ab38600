//! Entry point for callers: owns the catalog and the lookup tables.

use std::sync::Arc;

use crate::aggregate::aggregate_search;
use crate::alternates::AlternateNames;
use crate::catalog::CatalogClient;
use crate::error::{CatalogError, SearchError};
use crate::search_index::{filter_ingredients, merge_popular_ingredients, popular_ingredients};
use crate::session::SearchSession;
use crate::types::{IngredientRef, MatchResult, SelectedIngredient};
use crate::vocabulary::Vocabulary;

#[derive(Clone)]
pub struct Barback {
    catalog: Arc<dyn CatalogClient>,
    vocabulary: Arc<Vocabulary>,
    alternates: Arc<AlternateNames>,
}

impl Barback {
    pub fn new(
        catalog: Arc<dyn CatalogClient>,
        vocabulary: Vocabulary,
        alternates: AlternateNames,
    ) -> Self {
        Self {
            catalog,
            vocabulary: Arc::new(vocabulary),
            alternates: Arc::new(alternates),
        }
    }

    /// Engine with the built-in Turkish vocabulary and alternate names.
    pub fn with_builtin_tables(catalog: Arc<dyn CatalogClient>) -> Self {
        Self::new(
            catalog,
            Vocabulary::builtin().clone(),
            AlternateNames::builtin().clone(),
        )
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn alternates(&self) -> &AlternateNames {
        &self.alternates
    }

    /// Ranked recipes for the selected ingredients. See [`aggregate_search`].
    pub async fn aggregate_search(
        &self,
        selected: &[SelectedIngredient],
    ) -> Result<Vec<MatchResult>, SearchError> {
        aggregate_search(self.catalog.clone(), self.alternates.clone(), selected).await
    }

    /// Run a search for the session's current selection and apply the outcome.
    ///
    /// Returns `Ok(false)` when nothing is selected.
    pub async fn search_session(&self, session: &mut SearchSession) -> Result<bool, SearchError> {
        let Some(ticket) = session.begin_search() else {
            return Ok(false);
        };
        let outcome = self.aggregate_search(ticket.selection()).await;
        session.complete(ticket, outcome)
    }

    pub fn filter_ingredients(&self, query: &str, catalog: &[IngredientRef]) -> Vec<IngredientRef> {
        filter_ingredients(&self.vocabulary, query, catalog)
    }

    pub fn translate_for_display<'a>(&'a self, canonical_name: &'a str) -> &'a str {
        self.vocabulary.translate_ingredient(canonical_name)
    }

    pub fn select(&self, ingredient: &IngredientRef) -> SelectedIngredient {
        SelectedIngredient::new(ingredient, &self.vocabulary)
    }

    /// The catalog's ingredient list, optionally topped up with common
    /// ingredients it lacks, sorted by name.
    pub async fn load_ingredients(
        &self,
        include_popular: bool,
    ) -> Result<Vec<IngredientRef>, CatalogError> {
        let listed = self.catalog.list_all_ingredients().await?;
        let popular: &[String] = if include_popular {
            popular_ingredients()
        } else {
            &[]
        };
        Ok(merge_popular_ingredients(listed, popular))
    }
}
