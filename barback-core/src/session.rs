//! Selection and result state for one user's search screen.
//!
//! A search is started with [`SearchSession::begin_search`] and finished
//! with [`SearchSession::complete`]. Each new search (or a cleared
//! selection) supersedes the tickets handed out before it, so a slow,
//! stale response can never overwrite newer results.

use crate::aggregate::partition_matches;
use crate::error::SearchError;
use crate::types::{IngredientRef, MatchPartition, MatchResult, SelectedIngredient};
use crate::vocabulary::Vocabulary;

/// Handle for one in-flight search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    generation: u64,
    selection: Vec<SelectedIngredient>,
}

impl SearchTicket {
    /// The selection this search was started with.
    pub fn selection(&self) -> &[SelectedIngredient] {
        &self.selection
    }
}

#[derive(Debug, Default)]
pub struct SearchSession {
    selected: Vec<SelectedIngredient>,
    results: Vec<MatchResult>,
    generation: u64,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an ingredient unless it is already selected. Returns whether it was added.
    pub fn select(&mut self, ingredient: &IngredientRef, vocabulary: &Vocabulary) -> bool {
        self.select_name(&ingredient.name, vocabulary)
    }

    pub fn select_name(&mut self, canonical_name: &str, vocabulary: &Vocabulary) -> bool {
        let canonical_name = canonical_name.trim();
        if canonical_name.is_empty() || self.is_selected(canonical_name) {
            return false;
        }
        self.selected
            .push(SelectedIngredient::from_name(canonical_name, vocabulary));
        true
    }

    /// Returns whether anything was removed.
    pub fn remove(&mut self, canonical_name: &str) -> bool {
        let before = self.selected.len();
        self.selected.retain(|s| !s.same_ingredient(canonical_name));
        self.selected.len() != before
    }

    /// Drop the selection and results; any search in flight becomes stale.
    pub fn clear(&mut self) {
        self.selected.clear();
        self.results.clear();
        self.generation += 1;
    }

    pub fn is_selected(&self, canonical_name: &str) -> bool {
        self.selected.iter().any(|s| s.same_ingredient(canonical_name))
    }

    pub fn selected(&self) -> &[SelectedIngredient] {
        &self.selected
    }

    pub fn results(&self) -> &[MatchResult] {
        &self.results
    }

    pub fn full_matches(&self) -> Vec<MatchResult> {
        self.partition().full
    }

    pub fn partial_matches(&self) -> Vec<MatchResult> {
        self.partition().partial
    }

    pub fn partition(&self) -> MatchPartition {
        partition_matches(&self.results)
    }

    /// Start a search for the current selection, superseding earlier ones.
    ///
    /// Returns `None` when nothing is selected: there is nothing to search.
    pub fn begin_search(&mut self) -> Option<SearchTicket> {
        if self.selected.is_empty() {
            return None;
        }
        self.generation += 1;
        Some(SearchTicket {
            generation: self.generation,
            selection: self.selected.clone(),
        })
    }

    /// Apply the outcome of a search.
    ///
    /// A superseded ticket is ignored and returns `Ok(false)`. A failed
    /// search returns its error and leaves the selection and the previous
    /// results untouched, so the user can retry. Otherwise the results are
    /// replaced and `Ok(true)` is returned.
    pub fn complete(
        &mut self,
        ticket: SearchTicket,
        outcome: Result<Vec<MatchResult>, SearchError>,
    ) -> Result<bool, SearchError> {
        if ticket.generation != self.generation {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale search result"
            );
            return Ok(false);
        }

        self.results = outcome?;
        Ok(true)
    }
}
