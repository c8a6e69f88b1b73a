//! The listing-page pipeline: exact filter, fuzzy fallback, sort.
//!
//! Stateless. Callers pass the catalog and the full [`SearchRequest`] on every
//! change of filters, search term or sort key, and get a fresh ranked list.

use serde::Serialize;

use crate::filter::filter_exact;
use crate::fuzzy::{fuzzy_match, FuzzyConfig};
use crate::models::{SearchRequest, Vehicle};
use crate::sort::sort_vehicles;

/// How the result list was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchOutcome {
    /// Exact filtering found at least one vehicle.
    Exact,
    /// Exact matching was empty, the fuzzy fallback found vehicles for the term.
    FuzzyFallback,
    /// No vehicle matches the selected filters (no search term involved).
    NoMatchForFilters,
    /// A search term was given and neither exact nor fuzzy matching found anything.
    NoMatchForSearch,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Discovery<'a> {
    pub vehicles: Vec<&'a Vehicle>,
    pub outcome: MatchOutcome,
}

impl Discovery<'_> {
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn ids(&self) -> Vec<u32> {
        self.vehicles.iter().map(|v| v.id).collect()
    }
}

/// Runs the full pipeline for one state of the listing page.
pub fn discover<'a>(catalog: &'a [Vehicle], request: &SearchRequest, fuzzy: &FuzzyConfig) -> Discovery<'a> {
    let term = request.trimmed_term();
    let exact = filter_exact(catalog, &request.criteria, term);

    let (matched, outcome) = if !exact.is_empty() {
        (exact, MatchOutcome::Exact)
    } else if term.is_empty() {
        // Empty filters result is final; the fallback is only for searches
        (exact, MatchOutcome::NoMatchForFilters)
    } else {
        let recovered = fuzzy_match(catalog, term, fuzzy);
        if recovered.is_empty() {
            (recovered, MatchOutcome::NoMatchForSearch)
        } else {
            (recovered, MatchOutcome::FuzzyFallback)
        }
    };

    let vehicles = sort_vehicles(&matched, request.sort_key);
    tracing::debug!(
        outcome = ?outcome,
        results = vehicles.len(),
        sort_key = ?request.sort_key,
        "Discovery pipeline finished"
    );
    Discovery { vehicles, outcome }
}
