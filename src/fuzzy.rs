//! Fuzzy search fallback for the listing page.
//!
//! Used only when the exact filter pass found nothing for a non-empty search
//! term. Matches the term approximately against a vehicle's brand, model,
//! variant, year and fuel type so typos like "mercedez" or "fortunr" still
//! find something. Structured filter criteria are not applied here.

use serde::{Deserialize, Serialize};
use strsim::normalized_damerau_levenshtein;

use crate::models::Vehicle;

/// Default maximum normalized edit distance for a match.
pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// Tunables for the fallback search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuzzyConfig {
    /// Maximum normalized edit distance (0.0 = exact, 1.0 = anything).
    pub threshold: f64,
}

impl Default for FuzzyConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// A vehicle accepted by the fallback, with its distance from the term.
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyHit<'a> {
    pub vehicle: &'a Vehicle,
    /// Lower is better; 0.0 is a perfect match.
    pub distance: f64,
}

/// Returns vehicles approximately matching `search_term`, best match first.
///
/// Equal distances keep catalog order. An empty (or all-whitespace) term
/// matches nothing.
pub fn fuzzy_match<'a>(catalog: &'a [Vehicle], search_term: &str, config: &FuzzyConfig) -> Vec<&'a Vehicle> {
    fuzzy_rank(catalog, search_term, config)
        .into_iter()
        .map(|hit| hit.vehicle)
        .collect()
}

/// Like [`fuzzy_match`] but keeps the distances.
pub fn fuzzy_rank<'a>(catalog: &'a [Vehicle], search_term: &str, config: &FuzzyConfig) -> Vec<FuzzyHit<'a>> {
    let term = search_term.trim().to_lowercase();
    if term.is_empty() {
        return Vec::new();
    }
    let query_tokens: Vec<&str> = term.split_whitespace().collect();

    let mut hits: Vec<FuzzyHit<'a>> = catalog
        .iter()
        .filter_map(|vehicle| {
            vehicle_distance(vehicle, &term, &query_tokens, config.threshold)
                .map(|distance| FuzzyHit { vehicle, distance })
        })
        .collect();

    // Stable sort keeps catalog order among equal distances
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));

    tracing::debug!(term = %term, hits = hits.len(), threshold = config.threshold, "Fuzzy fallback ranked");
    hits
}

fn searchable_fields(vehicle: &Vehicle) -> [String; 5] {
    [
        vehicle.brand.to_lowercase(),
        vehicle.model.to_lowercase(),
        vehicle.variant.as_deref().unwrap_or_default().to_lowercase(),
        vehicle.year.to_string(),
        vehicle.fuel_type.to_lowercase(),
    ]
}

// Best of two readings: the whole term against each whole field, or every
// query word against its closest field word. `None` when neither is within
// the threshold.
fn vehicle_distance(vehicle: &Vehicle, term: &str, query_tokens: &[&str], threshold: f64) -> Option<f64> {
    let fields = searchable_fields(vehicle);

    let whole = fields
        .iter()
        .filter(|f| !f.is_empty())
        .map(|f| token_distance(term, f))
        .fold(1.0_f64, f64::min);

    let field_tokens: Vec<&str> = fields
        .iter()
        .flat_map(|f| f.split(|c: char| !c.is_alphanumeric()))
        .filter(|t| !t.is_empty())
        .collect();

    let mut total = 0.0;
    let mut all_tokens_match = true;
    for query in query_tokens {
        let best = field_tokens
            .iter()
            .map(|t| token_distance(query, t))
            .fold(1.0_f64, f64::min);
        if best > threshold {
            all_tokens_match = false;
            break;
        }
        total += best;
    }

    let mut distance = whole;
    if all_tokens_match && !query_tokens.is_empty() {
        distance = distance.min(total / query_tokens.len() as f64);
    }

    (distance <= threshold).then_some(distance)
}

// Normalized edit distance (an adjacent swap counts as one edit), forgiving a
// query that is a prefix (or typo'd prefix) of a longer word
fn token_distance(query: &str, candidate: &str) -> f64 {
    if candidate.contains(query) {
        return 0.0;
    }
    let full = 1.0 - normalized_damerau_levenshtein(query, candidate);

    let query_len = query.chars().count();
    if candidate.chars().count() > query_len {
        let prefix: String = candidate.chars().take(query_len).collect();
        full.min(1.0 - normalized_damerau_levenshtein(query, &prefix))
    } else {
        full
    }
}
