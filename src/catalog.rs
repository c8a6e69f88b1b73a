// Inventory ingestion: the catalog is loaded and validated once at start-up,
// then shared read-only by every request.

use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::CatalogError;
use crate::models::Vehicle;

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    vehicles: Vec<Vehicle>,
}

impl Catalog {
    // Validates that every id is unique; keeps the given order
    pub fn from_vehicles(vehicles: Vec<Vehicle>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for vehicle in &vehicles {
            if !seen.insert(vehicle.id) {
                return Err(CatalogError::DuplicateId(vehicle.id));
            }
        }
        Ok(Self { vehicles })
    }

    // Picks the parser from the file extension (.json or .csv)
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let vehicles = match extension.as_str() {
            "json" => load_json(path)?,
            "csv" => load_csv(path)?,
            other => return Err(CatalogError::UnsupportedFormat(other.to_string())),
        };
        tracing::info!("Loaded {} vehicles from {}", vehicles.len(), path.display());
        Self::from_vehicles(vehicles)
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn get(&self, id: u32) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}

fn load_json(path: &Path) -> Result<Vec<Vehicle>, CatalogError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

// Flat CSV layout; `features` is a single ';'-separated column
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CsvVehicleRow {
    id: u32,
    brand: String,
    model: String,
    variant: Option<String>,
    year: i32,
    price: String,
    mileage: String,
    fuel_type: String,
    transmission: String,
    location: String,
    condition: String,
    ownership: Option<String>,
    body_type: Option<String>,
    drive_type: Option<String>,
    seating: Option<u32>,
    color_exterior: Option<String>,
    color_interior: Option<String>,
    engine_cc: Option<u32>,
    horsepower: Option<u32>,
    features: Option<String>,
}

impl From<CsvVehicleRow> for Vehicle {
    fn from(row: CsvVehicleRow) -> Self {
        let features = row
            .features
            .map(|f| {
                f.split(';')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Vehicle {
            id: row.id,
            brand: row.brand,
            model: row.model,
            variant: row.variant,
            year: row.year,
            price: row.price,
            mileage: row.mileage,
            fuel_type: row.fuel_type,
            transmission: row.transmission,
            location: row.location,
            condition: row.condition,
            ownership: row.ownership,
            body_type: row.body_type,
            drive_type: row.drive_type,
            seating: row.seating,
            color_exterior: row.color_exterior,
            color_interior: row.color_interior,
            engine_cc: row.engine_cc,
            horsepower: row.horsepower,
            features,
        }
    }
}

fn load_csv(path: &Path) -> Result<Vec<Vehicle>, CatalogError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut vehicles = Vec::new();
    for row in reader.deserialize::<CsvVehicleRow>() {
        vehicles.push(Vehicle::from(row?));
    }
    Ok(vehicles)
}
