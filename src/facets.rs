// Options offered by the filter sidebar, derived from the catalog itself

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::models::Vehicle;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Span<T> {
    pub min: T,
    pub max: T,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub brands: Vec<String>,
    pub models_by_brand: BTreeMap<String, Vec<String>>,
    pub fuel_types: Vec<String>,
    pub transmissions: Vec<String>,
    pub body_types: Vec<String>,
    pub drive_types: Vec<String>,
    pub seating_capacities: Vec<String>, // As strings, matching FilterCriteria
    pub colors_exterior: Vec<String>,
    pub colors_interior: Vec<String>,
    pub conditions: Vec<String>,
    pub ownership: Vec<String>,
    pub features: Vec<String>,
    pub price: Option<Span<f64>>,
    pub year: Option<Span<i32>>,
    pub mileage: Option<Span<f64>>,
}

impl FilterOptions {
    pub fn from_catalog(vehicles: &[Vehicle]) -> Self {
        let mut brands = BTreeSet::new();
        let mut models: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        let mut fuel_types = BTreeSet::new();
        let mut transmissions = BTreeSet::new();
        let mut body_types = BTreeSet::new();
        let mut drive_types = BTreeSet::new();
        let mut seating = BTreeSet::new();
        let mut colors_exterior = BTreeSet::new();
        let mut colors_interior = BTreeSet::new();
        let mut conditions = BTreeSet::new();
        let mut ownership = BTreeSet::new();
        let mut features = BTreeSet::new();

        let mut price: Option<Span<f64>> = None;
        let mut year: Option<Span<i32>> = None;
        let mut mileage: Option<Span<f64>> = None;

        for v in vehicles {
            brands.insert(v.brand.clone());
            models.entry(v.brand.clone()).or_default().insert(v.model.clone());
            fuel_types.insert(v.fuel_type.clone());
            transmissions.insert(v.transmission.clone());
            conditions.insert(v.condition.clone());
            body_types.extend(v.body_type.clone());
            drive_types.extend(v.drive_type.clone());
            seating.extend(v.seating);
            colors_exterior.extend(v.color_exterior.clone());
            colors_interior.extend(v.color_interior.clone());
            ownership.extend(v.ownership.clone());
            features.extend(v.features.iter().cloned());

            price = Some(widen_f64(price, v.price_amount()));
            mileage = Some(widen_f64(mileage, v.mileage_amount()));
            year = Some(match year {
                Some(span) => Span {
                    min: span.min.min(v.year),
                    max: span.max.max(v.year),
                },
                None => Span { min: v.year, max: v.year },
            });
        }

        Self {
            brands: brands.into_iter().collect(),
            models_by_brand: models
                .into_iter()
                .map(|(brand, set)| (brand, set.into_iter().collect()))
                .collect(),
            fuel_types: fuel_types.into_iter().collect(),
            transmissions: transmissions.into_iter().collect(),
            body_types: body_types.into_iter().collect(),
            drive_types: drive_types.into_iter().collect(),
            // BTreeSet<u32> keeps numeric order ("5" before "10")
            seating_capacities: seating.into_iter().map(|s: u32| s.to_string()).collect(),
            colors_exterior: colors_exterior.into_iter().collect(),
            colors_interior: colors_interior.into_iter().collect(),
            conditions: conditions.into_iter().collect(),
            ownership: ownership.into_iter().collect(),
            features: features.into_iter().collect(),
            price,
            year,
            mileage,
        }
    }
}

fn widen_f64(span: Option<Span<f64>>, value: f64) -> Span<f64> {
    match span {
        Some(span) => Span {
            min: span.min.min(value),
            max: span.max.max(value),
        },
        None => Span { min: value, max: value },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tests::vehicle;

    #[test]
    fn collects_sorted_distinct_values() {
        let mut a = vehicle(1, "Toyota", "Fortuner", 2020, "₹32 Lakh", "45,000 km");
        a.seating = Some(7);
        a.body_type = Some("SUV".into());
        a.features = vec!["Sunroof".into(), "Cruise Control".into()];
        let mut b = vehicle(2, "BMW", "X5", 2022, "₹85 Lakh", "12,000 km");
        b.seating = Some(5);
        b.fuel_type = "Diesel".into();
        b.features = vec!["Sunroof".into()];
        let mut c = vehicle(3, "Toyota", "Camry", 2018, "₹1.2 Cr", "60,000 km");
        c.seating = Some(10);

        let options = FilterOptions::from_catalog(&[a, b, c]);
        assert_eq!(options.brands, vec!["BMW", "Toyota"]);
        assert_eq!(options.models_by_brand["Toyota"], vec!["Camry", "Fortuner"]);
        assert_eq!(options.fuel_types, vec!["Diesel", "Petrol"]);
        assert_eq!(options.body_types, vec!["SUV"]);
        assert_eq!(options.seating_capacities, vec!["5", "7", "10"]);
        assert_eq!(options.features, vec!["Cruise Control", "Sunroof"]);
        assert_eq!(options.year, Some(Span { min: 2018, max: 2022 }));
        assert_eq!(options.price, Some(Span { min: 3_200_000.0, max: 12_000_000.0 }));
        assert_eq!(options.mileage, Some(Span { min: 12_000.0, max: 60_000.0 }));
    }

    #[test]
    fn empty_catalog_has_no_ranges() {
        let options = FilterOptions::from_catalog(&[]);
        assert!(options.brands.is_empty());
        assert_eq!(options.price, None);
        assert_eq!(options.year, None);
    }
}
