//! Multi-ingredient search: fan out one lookup per selected ingredient,
//! tally how many selected ingredients each recipe uses, rank by coverage.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinSet;

use crate::alternates::AlternateNames;
use crate::catalog::CatalogClient;
use crate::error::SearchError;
use crate::lookup::lookup_ingredient;
use crate::types::{MatchPartition, MatchResult, RecipeSummary, SelectedIngredient};

/// Running coverage count for one recipe during a single search.
struct MatchTally {
    recipe: RecipeSummary,
    /// Canonical names of the selected ingredients that found this recipe.
    matched: Vec<String>,
}

impl MatchTally {
    fn new(recipe: RecipeSummary) -> Self {
        Self {
            recipe,
            matched: Vec::new(),
        }
    }

    /// Count `ingredient` once, however many of its alternates hit.
    fn record(&mut self, ingredient: &str) {
        if !self.matched.iter().any(|m| m == ingredient) {
            self.matched.push(ingredient.to_string());
        }
    }

    fn into_result(self, total_selected: usize) -> MatchResult {
        MatchResult {
            recipe: self.recipe,
            match_count: self.matched.len(),
            total_selected,
            matched_ingredients: self.matched,
        }
    }
}

/// Find recipes covered by `selected`, best coverage first.
///
/// Lookups run concurrently, one task per ingredient. Their results are
/// folded in selection order once all have finished, so the ranking does
/// not depend on which request returned first: ties keep the order in which
/// recipes were first seen. If any ingredient's primary query fails the
/// whole search fails and the remaining lookups are aborted.
///
/// An empty selection returns no results without touching the catalog.
pub async fn aggregate_search(
    catalog: Arc<dyn CatalogClient>,
    alternates: Arc<AlternateNames>,
    selected: &[SelectedIngredient],
) -> Result<Vec<MatchResult>, SearchError> {
    let distinct = distinct_selection(selected);
    if distinct.is_empty() {
        return Ok(Vec::new());
    }

    let mut tasks = JoinSet::new();
    for (index, ingredient) in distinct.iter().enumerate() {
        let catalog = catalog.clone();
        let alternates = alternates.clone();
        let name = ingredient.canonical_name.clone();
        tasks.spawn(async move {
            let result = lookup_ingredient(catalog.as_ref(), &alternates, &name).await;
            (index, result)
        });
    }

    let mut per_ingredient: Vec<Vec<RecipeSummary>> = vec![Vec::new(); distinct.len()];
    while let Some(joined) = tasks.join_next().await {
        let (index, result) = match joined {
            Ok(done) => done,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(_) => return Err(SearchError::Cancelled),
        };
        match result {
            Ok(recipes) => per_ingredient[index] = recipes,
            Err(source) => {
                // Dropping `tasks` aborts the lookups still in flight.
                return Err(SearchError::Catalog {
                    ingredient: distinct[index].canonical_name.clone(),
                    source,
                });
            }
        }
    }

    let results = rank(&distinct, per_ingredient);
    tracing::debug!(
        ingredients = distinct.len(),
        recipes = results.len(),
        full_matches = results.iter().filter(|r| r.is_full_match()).count(),
        "aggregate search complete"
    );
    Ok(results)
}

/// Drop repeated selections of the same ingredient (case-insensitive), keeping the first.
fn distinct_selection(selected: &[SelectedIngredient]) -> Vec<SelectedIngredient> {
    let mut distinct: Vec<SelectedIngredient> = Vec::with_capacity(selected.len());
    for ingredient in selected {
        if !distinct
            .iter()
            .any(|d| d.same_ingredient(&ingredient.canonical_name))
        {
            distinct.push(ingredient.clone());
        }
    }
    distinct
}

/// Fold per-ingredient lookups into tallies and sort by coverage.
fn rank(
    selected: &[SelectedIngredient],
    per_ingredient: Vec<Vec<RecipeSummary>>,
) -> Vec<MatchResult> {
    let mut tallies: Vec<MatchTally> = Vec::new();
    let mut by_id: HashMap<String, usize> = HashMap::new();

    for (ingredient, recipes) in selected.iter().zip(per_ingredient) {
        for recipe in recipes {
            let slot = match by_id.get(&recipe.id) {
                Some(&slot) => slot,
                None => {
                    by_id.insert(recipe.id.clone(), tallies.len());
                    tallies.push(MatchTally::new(recipe));
                    tallies.len() - 1
                }
            };
            tallies[slot].record(&ingredient.canonical_name);
        }
    }

    let total = selected.len();
    let mut results: Vec<MatchResult> = tallies.into_iter().map(|t| t.into_result(total)).collect();
    // Stable: equal counts keep first-seen order.
    results.sort_by(|a, b| b.match_count.cmp(&a.match_count));
    results
}

/// Split ranked results into full and partial matches.
pub fn partition_matches(results: &[MatchResult]) -> MatchPartition {
    let (full, partial): (Vec<_>, Vec<_>) =
        results.iter().cloned().partition(MatchResult::is_full_match);
    MatchPartition { full, partial }
}
