// Superlatives shown above the comparison table.
// Each is an independent reduction over the selected vehicles; ties go to
// the vehicle selected first.

use serde::Serialize;

use crate::models::Vehicle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Badge {
    BestPrice,
    Newest,
    LowestMileage,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Insights<'a> {
    pub cheapest: &'a Vehicle,
    pub newest: &'a Vehicle,
    pub lowest_mileage: &'a Vehicle,
}

// `None` for an empty selection: nothing to render
pub fn derive_insights<'a>(selected: &[&'a Vehicle]) -> Option<Insights<'a>> {
    let (&first, rest) = selected.split_first()?;

    let mut cheapest = (first, first.price_amount());
    let mut newest = first;
    let mut lowest_mileage = (first, first.mileage_amount());

    for &vehicle in rest {
        let price = vehicle.price_amount();
        if price < cheapest.1 {
            cheapest = (vehicle, price);
        }
        if vehicle.year > newest.year {
            newest = vehicle;
        }
        let mileage = vehicle.mileage_amount();
        if mileage < lowest_mileage.1 {
            lowest_mileage = (vehicle, mileage);
        }
    }

    Some(Insights {
        cheapest: cheapest.0,
        newest,
        lowest_mileage: lowest_mileage.0,
    })
}

impl Insights<'_> {
    // A vehicle can hold several badges at once
    pub fn badges_for(&self, vehicle_id: u32) -> Vec<Badge> {
        let mut badges = Vec::new();
        if self.cheapest.id == vehicle_id {
            badges.push(Badge::BestPrice);
        }
        if self.newest.id == vehicle_id {
            badges.push(Badge::Newest);
        }
        if self.lowest_mileage.id == vehicle_id {
            badges.push(Badge::LowestMileage);
        }
        badges
    }

    // Id-only view for API responses
    pub fn summary(&self) -> InsightsSummary {
        InsightsSummary {
            cheapest_id: self.cheapest.id,
            newest_id: self.newest.id,
            lowest_mileage_id: self.lowest_mileage.id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsSummary {
    pub cheapest_id: u32,
    pub newest_id: u32,
    pub lowest_mileage_id: u32,
}
