// CSV export of a ranked result list

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

use crate::models::{SearchRequest, Vehicle};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportRow<'a> {
    rank: usize,
    id: u32,
    brand: &'a str,
    model: &'a str,
    variant: &'a str,
    year: i32,
    price: &'a str,
    price_amount: f64,
    mileage: &'a str,
    mileage_km: f64,
    fuel_type: &'a str,
    transmission: &'a str,
    location: &'a str,
}

// Column names as `ExportRow` serializes them
const HEADER: [&str; 13] = [
    "rank",
    "id",
    "brand",
    "model",
    "variant",
    "year",
    "price",
    "priceAmount",
    "mileage",
    "mileageKm",
    "fuelType",
    "transmission",
    "location",
];

pub fn write_csv<W: Write>(writer: W, vehicles: &[&Vehicle]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    // serialize() only emits the header along with the first record
    if vehicles.is_empty() {
        csv_writer
            .write_record(HEADER)
            .context("Failed to write CSV header")?;
    }
    for (index, v) in vehicles.iter().enumerate() {
        csv_writer
            .serialize(ExportRow {
                rank: index + 1,
                id: v.id,
                brand: &v.brand,
                model: &v.model,
                variant: v.variant.as_deref().unwrap_or_default(),
                year: v.year,
                price: &v.price,
                price_amount: v.price_amount(),
                mileage: &v.mileage,
                mileage_km: v.mileage_amount(),
                fuel_type: &v.fuel_type,
                transmission: &v.transmission,
                location: &v.location,
            })
            .with_context(|| format!("Failed to write CSV row for vehicle {}", v.id))?;
    }
    csv_writer.flush().context("Failed to flush CSV writer")?;
    Ok(())
}

pub fn to_csv_bytes(vehicles: &[&Vehicle]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, vehicles)?;
    Ok(buffer)
}

// e.g. "BMW-Audi_x5_20240102_153000.csv"
pub fn export_file_name(request: &SearchRequest, timestamp: &str) -> String {
    let brands = if request.criteria.brand.is_empty() {
        "AllBrands".to_string()
    } else {
        request.criteria.brand.join("-")
    };
    let term = request.trimmed_term();
    let term = if term.is_empty() { "Any" } else { term };
    let raw = format!("{}_{}_{}.csv", brands, term, timestamp);
    // Keep the name safe for a Content-Disposition header
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() || "-_.".contains(c) { c } else { '-' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tests::vehicle;
    use crate::models::FilterCriteria;

    #[test]
    fn writes_header_and_ranked_rows() {
        let a = vehicle(7, "Lexus", "ES", 2021, "₹55 Lakh", "18,000 km");
        let b = vehicle(3, "Jeep", "Compass", 2019, "₹16.5 Lakh", "52,000 km");
        let bytes = to_csv_bytes(&[&a, &b]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("rank,id,brand,model,variant,year,price,priceAmount"));
        assert!(lines[1].starts_with("1,7,Lexus,ES,,2021,₹55 Lakh,5500000"));
        assert!(lines[2].starts_with("2,3,Jeep,Compass,,2019,₹16.5 Lakh,1650000"));
    }

    #[test]
    fn empty_export_still_has_header() {
        let bytes = to_csv_bytes(&[]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.lines().collect::<Vec<_>>(), vec![HEADER.join(",")]);

        // Same columns as a populated export
        let a = vehicle(1, "Kia", "Carnival", 2022, "₹30 Lakh", "8,000 km");
        let populated = String::from_utf8(to_csv_bytes(&[&a]).unwrap()).unwrap();
        assert_eq!(populated.lines().next(), text.lines().next());
    }

    #[test]
    fn file_name_reflects_request() {
        let request = SearchRequest {
            criteria: FilterCriteria {
                brand: vec!["BMW".into(), "Audi".into()],
                ..Default::default()
            },
            search_term: " x5 m ".into(),
            ..Default::default()
        };
        assert_eq!(
            export_file_name(&request, "20240102_153000"),
            "BMW-Audi_x5-m_20240102_153000.csv"
        );
        assert_eq!(
            export_file_name(&SearchRequest::default(), "20240102_153000"),
            "AllBrands_Any_20240102_153000.csv"
        );
    }
}
