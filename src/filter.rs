// Exact (non-fuzzy) filtering of the catalog against structured criteria
// and a free-text search term. Output keeps catalog order.

use crate::models::{FilterCriteria, Vehicle};

// Returns every vehicle that passes all active criteria and the search term
pub fn filter_exact<'a>(
    catalog: &'a [Vehicle],
    criteria: &FilterCriteria,
    search_term: &str,
) -> Vec<&'a Vehicle> {
    let term = search_term.trim().to_lowercase();
    let results: Vec<&Vehicle> = catalog
        .iter()
        .filter(|v| matches_criteria(v, criteria) && matches_search(v, &term))
        .collect();

    tracing::debug!(
        catalog = catalog.len(),
        matched = results.len(),
        active_filters = criteria.active_count(),
        "Exact filter pass complete"
    );
    results
}

// Each criterion is an independent veto; empty sets and unset bounds pass
pub fn matches_criteria(vehicle: &Vehicle, criteria: &FilterCriteria) -> bool {
    in_set(&criteria.brand, Some(&vehicle.brand))
        && in_set(&criteria.model, Some(&vehicle.model))
        && in_set(&criteria.fuel_type, Some(&vehicle.fuel_type))
        && in_set(&criteria.transmission, Some(&vehicle.transmission))
        && in_set(&criteria.ownership, vehicle.ownership.as_ref())
        && in_set(&criteria.body_type, vehicle.body_type.as_ref())
        && in_set(&criteria.drive_type, vehicle.drive_type.as_ref())
        && seating_matches(&criteria.seating_capacity, vehicle.seating)
        && equals(&criteria.condition, Some(&vehicle.condition))
        && equals(&criteria.color_exterior, vehicle.color_exterior.as_ref())
        && equals(&criteria.color_interior, vehicle.color_interior.as_ref())
        && in_range(vehicle.price_amount(), criteria.price_min, criteria.price_max)
        && in_range(
            f64::from(vehicle.year),
            criteria.year_min.map(f64::from),
            criteria.year_max.map(f64::from),
        )
        && in_range(vehicle.mileage_amount(), criteria.mileage_min, criteria.mileage_max)
        && optional_in_range(vehicle.engine_cc, criteria.engine_min, criteria.engine_max)
        && optional_in_range(vehicle.horsepower, criteria.horsepower_min, criteria.horsepower_max)
        && criteria.features.iter().all(|f| vehicle.has_feature(f))
}

// `term` must already be trimmed and lower-cased; empty matches everything
pub fn matches_search(vehicle: &Vehicle, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    search_haystack(vehicle).contains(term)
}

fn search_haystack(vehicle: &Vehicle) -> String {
    format!(
        "{} {} {} {} {} {}",
        vehicle.brand,
        vehicle.model,
        vehicle.year,
        vehicle.fuel_type,
        vehicle.transmission,
        vehicle.variant.as_deref().unwrap_or_default()
    )
    .to_lowercase()
}

fn in_set(allowed: &[String], value: Option<&String>) -> bool {
    if allowed.is_empty() {
        return true;
    }
    value.is_some_and(|v| allowed.contains(v))
}

fn equals(wanted: &Option<String>, value: Option<&String>) -> bool {
    match wanted {
        None => true,
        Some(w) => value == Some(w),
    }
}

// Seating is stored as a number but offered as string options ("5", "7")
fn seating_matches(allowed: &[String], seating: Option<u32>) -> bool {
    if allowed.is_empty() {
        return true;
    }
    seating.is_some_and(|s| allowed.iter().any(|a| *a == s.to_string()))
}

fn in_range(value: f64, min: Option<f64>, max: Option<f64>) -> bool {
    min.is_none_or(|m| value >= m) && max.is_none_or(|m| value <= m)
}

// Vehicles that don't report the value are not vetoed by the range
fn optional_in_range(value: Option<u32>, min: Option<f64>, max: Option<f64>) -> bool {
    match value {
        Some(v) => in_range(f64::from(v), min, max),
        None => true,
    }
}
