// Ordering of result lists for the listing page.
// Always stable: vehicles tied on the key keep their incoming order.

use std::cmp::Ordering;

use crate::models::{SortKey, Vehicle};

// Returns a new ordering; the input slice is left untouched
pub fn sort_vehicles<'a>(vehicles: &[&'a Vehicle], key: SortKey) -> Vec<&'a Vehicle> {
    let mut sorted = vehicles.to_vec();
    match key {
        SortKey::Newest => sorted.sort_by(|a, b| b.year.cmp(&a.year)),
        SortKey::Oldest => sorted.sort_by(|a, b| a.year.cmp(&b.year)),
        // Parse once per vehicle rather than once per comparison
        SortKey::PriceHigh => sort_by_amount(&mut sorted, Vehicle::price_amount, true),
        SortKey::PriceLow => sort_by_amount(&mut sorted, Vehicle::price_amount, false),
        SortKey::MileageLow => sort_by_amount(&mut sorted, Vehicle::mileage_amount, false),
        SortKey::BrandAz => sorted.sort_by(|a, b| compare_brand(&a.brand, &b.brand)),
    }
    sorted
}

fn sort_by_amount(vehicles: &mut Vec<&Vehicle>, amount: fn(&Vehicle) -> f64, descending: bool) {
    let mut keyed: Vec<(f64, &Vehicle)> = vehicles.iter().map(|v| (amount(*v), *v)).collect();
    keyed.sort_by(|a, b| {
        if descending {
            b.0.total_cmp(&a.0)
        } else {
            a.0.total_cmp(&b.0)
        }
    });
    *vehicles = keyed.into_iter().map(|(_, v)| v).collect();
}

// Collation-style ordering: diacritics and case are folded away first
// ("Škoda" sorts with "Skoda"), then unaccented before accented, then
// lowercase before uppercase, and raw text last
fn compare_brand(a: &str, b: &str) -> Ordering {
    fold_key(a)
        .cmp(&fold_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}

fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}
