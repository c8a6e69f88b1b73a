// Data structures shared by the discovery pipeline, the calculators and the API
// e.g., Vehicle, FilterCriteria, SortKey, LoanResult

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{CriteriaError, SelectionError};
use crate::value_parser::parse_amount;

// Most vehicles a user can put side by side on the compare page
pub const MAX_COMPARISON: usize = 4;

// A single vehicle from the dealership inventory (read-only for the core)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")] // Match JavaScript frontend keys
pub struct Vehicle {
    pub id: u32,
    pub brand: String,
    pub model: String,
    pub variant: Option<String>,
    pub year: i32,
    pub price: String,   // Display string, e.g. "₹12.5 Lakh"
    pub mileage: String, // Display string, e.g. "45,000 km"
    pub fuel_type: String,
    pub transmission: String,
    pub location: String,
    pub condition: String,
    pub ownership: Option<String>,
    pub body_type: Option<String>,
    pub drive_type: Option<String>,
    pub seating: Option<u32>,
    pub color_exterior: Option<String>,
    pub color_interior: Option<String>,
    pub engine_cc: Option<u32>,
    pub horsepower: Option<u32>,
    #[serde(default)]
    pub features: Vec<String>,
}

impl Vehicle {
    // Price in base currency units (rupees)
    pub fn price_amount(&self) -> f64 {
        parse_amount(&self.price)
    }

    // Mileage in base distance units (km)
    pub fn mileage_amount(&self) -> f64 {
        parse_amount(&self.mileage)
    }

    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }
}

// Structured filter state owned by the caller.
// Empty sets and `None` bounds mean "no constraint on this dimension".
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    pub brand: Vec<String>,
    pub model: Vec<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub year_min: Option<i32>,
    pub year_max: Option<i32>,
    pub fuel_type: Vec<String>,
    pub transmission: Vec<String>,
    pub mileage_min: Option<f64>,
    pub mileage_max: Option<f64>,
    pub ownership: Vec<String>,
    pub body_type: Vec<String>,
    pub drive_type: Vec<String>,
    pub seating_capacity: Vec<String>,
    pub color_exterior: Option<String>,
    pub color_interior: Option<String>,
    pub engine_min: Option<f64>,
    pub engine_max: Option<f64>,
    pub horsepower_min: Option<f64>,
    pub horsepower_max: Option<f64>,
    pub condition: Option<String>,
    pub features: Vec<String>,
}

impl FilterCriteria {
    // Checks the `min <= max` invariant on every bounded pair
    pub fn validate(&self) -> Result<(), CriteriaError> {
        let year_min = self.year_min.map(f64::from);
        let year_max = self.year_max.map(f64::from);
        let pairs = [
            ("price", self.price_min, self.price_max),
            ("year", year_min, year_max),
            ("mileage", self.mileage_min, self.mileage_max),
            ("engine", self.engine_min, self.engine_max),
            ("horsepower", self.horsepower_min, self.horsepower_max),
        ];
        for (dimension, min, max) in pairs {
            if let (Some(min), Some(max)) = (min, max) {
                if min > max {
                    return Err(CriteriaError::InvertedRange {
                        dimension: dimension.to_string(),
                        min,
                        max,
                    });
                }
            }
        }
        Ok(())
    }

    // Number of dimensions that currently constrain the result set.
    // A range with either bound set counts once.
    pub fn active_count(&self) -> usize {
        let sets = [
            &self.brand,
            &self.model,
            &self.fuel_type,
            &self.transmission,
            &self.ownership,
            &self.body_type,
            &self.drive_type,
            &self.seating_capacity,
            &self.features,
        ];
        let singles = [&self.color_exterior, &self.color_interior, &self.condition];
        let ranges = [
            self.price_min.is_some() || self.price_max.is_some(),
            self.year_min.is_some() || self.year_max.is_some(),
            self.mileage_min.is_some() || self.mileage_max.is_some(),
            self.engine_min.is_some() || self.engine_max.is_some(),
            self.horsepower_min.is_some() || self.horsepower_max.is_some(),
        ];

        sets.iter().filter(|s| !s.is_empty()).count()
            + singles.iter().filter(|s| s.is_some()).count()
            + ranges.iter().filter(|r| **r).count()
    }

    pub fn is_active(&self) -> bool {
        self.active_count() > 0
    }
}

// Fixed set of orderings offered by the listing page
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    #[default]
    #[serde(rename = "newest")]
    Newest,
    #[serde(rename = "oldest")]
    Oldest,
    #[serde(rename = "priceHigh")]
    PriceHigh,
    #[serde(rename = "priceLow")]
    PriceLow,
    #[serde(rename = "mileageLow")]
    MileageLow,
    #[serde(rename = "brandAZ")]
    BrandAz,
}

// Everything the discovery pipeline needs besides the catalog itself
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchRequest {
    pub criteria: FilterCriteria,
    pub search_term: String,
    pub sort_key: SortKey,
}

impl SearchRequest {
    // Search term as the pipeline sees it: trimmed, possibly empty
    pub fn trimmed_term(&self) -> &str {
        self.search_term.trim()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoanParameters {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub term_months: i64,
}

// All three fields are rounded to whole rupees independently
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoanResult {
    pub monthly_installment: i64,
    pub total_interest: i64,
    pub total_payable: i64,
}

// Ordered, duplicate-free set of 1..=4 vehicle ids picked for comparison
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ComparisonSelection(Vec<u32>);

impl ComparisonSelection {
    pub fn new(ids: Vec<u32>) -> Result<Self, SelectionError> {
        if ids.is_empty() {
            return Err(SelectionError::Empty);
        }
        if ids.len() > MAX_COMPARISON {
            return Err(SelectionError::TooMany {
                max: MAX_COMPARISON,
                got: ids.len(),
            });
        }
        let mut seen = HashSet::new();
        for id in &ids {
            if !seen.insert(*id) {
                return Err(SelectionError::Duplicate(*id));
            }
        }
        Ok(Self(ids))
    }

    pub fn ids(&self) -> &[u32] {
        &self.0
    }

    // Looks the selected ids up in the catalog, keeping selection order
    pub fn resolve<'a>(&self, vehicles: &'a [Vehicle]) -> Result<Vec<&'a Vehicle>, SelectionError> {
        self.0
            .iter()
            .map(|id| {
                vehicles
                    .iter()
                    .find(|v| v.id == *id)
                    .ok_or(SelectionError::UnknownVehicle(*id))
            })
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    // Small builder used by the unit tests across the crate
    pub(crate) fn vehicle(id: u32, brand: &str, model: &str, year: i32, price: &str, mileage: &str) -> Vehicle {
        Vehicle {
            id,
            brand: brand.to_string(),
            model: model.to_string(),
            variant: None,
            year,
            price: price.to_string(),
            mileage: mileage.to_string(),
            fuel_type: "Petrol".to_string(),
            transmission: "Automatic".to_string(),
            location: "Mumbai".to_string(),
            condition: "Excellent".to_string(),
            ownership: None,
            body_type: None,
            drive_type: None,
            seating: None,
            color_exterior: None,
            color_interior: None,
            engine_cc: None,
            horsepower: None,
            features: Vec::new(),
        }
    }

    #[test]
    fn vehicle_deserializes_from_camel_case_json() {
        let json = r#"{
            "id": 7,
            "brand": "BMW",
            "model": "X5",
            "variant": "xDrive40i",
            "year": 2021,
            "price": "₹75 Lakh",
            "mileage": "32,000 km",
            "fuelType": "Petrol",
            "transmission": "Automatic",
            "location": "Delhi",
            "condition": "Excellent",
            "bodyType": "SUV",
            "seating": 7,
            "features": ["Sunroof", "360 Camera"]
        }"#;
        let v: Vehicle = serde_json::from_str(json).unwrap();
        assert_eq!(v.fuel_type, "Petrol");
        assert_eq!(v.body_type.as_deref(), Some("SUV"));
        assert_eq!(v.ownership, None);
        assert_eq!(v.price_amount(), 7_500_000.0);
        assert_eq!(v.mileage_amount(), 32_000.0);
        assert!(v.has_feature("Sunroof"));
        assert!(!v.has_feature("sunroof"));
    }

    #[test]
    fn criteria_defaults_are_inactive() {
        let criteria = FilterCriteria::default();
        assert_eq!(criteria.active_count(), 0);
        assert!(!criteria.is_active());
        assert!(criteria.validate().is_ok());
    }

    #[test]
    fn criteria_counts_each_dimension_once() {
        let criteria = FilterCriteria {
            brand: vec!["BMW".into(), "Audi".into()],
            price_min: Some(500_000.0),
            price_max: Some(1_000_000.0),
            condition: Some("Excellent".into()),
            ..Default::default()
        };
        assert_eq!(criteria.active_count(), 3);
    }

    #[test]
    fn criteria_rejects_inverted_range() {
        let criteria = FilterCriteria {
            year_min: Some(2022),
            year_max: Some(2018),
            ..Default::default()
        };
        match criteria.validate() {
            Err(CriteriaError::InvertedRange { dimension, .. }) => assert_eq!(dimension, "year"),
            other => panic!("expected inverted range, got {:?}", other),
        }
    }

    #[test]
    fn sort_key_uses_frontend_names() {
        assert_eq!(serde_json::to_string(&SortKey::BrandAz).unwrap(), "\"brandAZ\"");
        let key: SortKey = serde_json::from_str("\"priceLow\"").unwrap();
        assert_eq!(key, SortKey::PriceLow);
        let request: SearchRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.sort_key, SortKey::Newest);
    }

    #[test]
    fn selection_enforces_size_and_uniqueness() {
        assert!(matches!(ComparisonSelection::new(vec![]), Err(SelectionError::Empty)));
        assert!(matches!(
            ComparisonSelection::new(vec![1, 2, 3, 4, 5]),
            Err(SelectionError::TooMany { max: 4, got: 5 })
        ));
        assert!(matches!(
            ComparisonSelection::new(vec![1, 2, 1]),
            Err(SelectionError::Duplicate(1))
        ));
        let selection = ComparisonSelection::new(vec![3, 1]).unwrap();
        assert_eq!(selection.ids(), &[3, 1]);
    }

    #[test]
    fn selection_resolves_in_selection_order() {
        let catalog = vec![
            vehicle(1, "Audi", "A4", 2019, "₹30 Lakh", "40,000 km"),
            vehicle(2, "BMW", "X1", 2020, "₹35 Lakh", "20,000 km"),
            vehicle(3, "Volvo", "XC60", 2021, "₹50 Lakh", "10,000 km"),
        ];
        let selection = ComparisonSelection::new(vec![3, 1]).unwrap();
        let resolved = selection.resolve(&catalog).unwrap();
        assert_eq!(resolved.iter().map(|v| v.id).collect::<Vec<_>>(), vec![3, 1]);

        let missing = ComparisonSelection::new(vec![2, 9]).unwrap();
        assert!(matches!(missing.resolve(&catalog), Err(SelectionError::UnknownVehicle(9))));
    }
}
