//! showroom_rust: vehicle discovery and evaluation for a pre-owned luxury car
//! dealership.
//!
//! The core is a set of pure functions over an in-memory catalog:
//! - `value_parser`: "₹12.5 Lakh" / "45,000 km" into canonical numbers
//! - `filter` + `fuzzy` + `sort`, wired together by `discovery::discover`
//! - `emi`: fixed-rate loan installments for the finance widgets
//! - `insights`: cheapest / newest / lowest-mileage across a comparison
//!
//! `routes` exposes them as a small JSON API for the site front end.

use axum::extract::FromRef;
use cached::SizedCache;
use std::sync::{Arc, Mutex};

pub mod catalog;
pub mod config;
pub mod discovery;
pub mod emi;
pub mod error;
pub mod export;
pub mod facets;
pub mod filter;
pub mod fuzzy;
pub mod insights;
pub mod models;
pub mod routes;
pub mod sort;
pub mod value_parser;

// Re-export main types
pub use catalog::Catalog;
pub use discovery::{discover, Discovery, MatchOutcome};
pub use emi::{compute_emi, quote_with_down_payment, DownPaymentBand, LoanQuote};
pub use filter::filter_exact;
pub use fuzzy::{fuzzy_match, FuzzyConfig};
pub use insights::{derive_insights, Badge, Insights};
pub use models::{
    ComparisonSelection, FilterCriteria, LoanParameters, LoanResult, SearchRequest, SortKey, Vehicle,
};
pub use sort::sort_vehicles;
pub use value_parser::{format_price, parse_amount};

use crate::config::Settings;

// Memoised outcome of one search, stored as vehicle ids
#[derive(Debug, Clone)]
pub struct CachedSearch {
    pub ids: Vec<u32>,
    pub outcome: MatchOutcome,
}

pub type SearchCache = Arc<Mutex<SizedCache<String, CachedSearch>>>;

// Shared application state handed to every handler
#[derive(Clone, FromRef)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub catalog: Arc<Catalog>,
    pub search_cache: SearchCache,
}

impl AppState {
    pub fn new(settings: Settings, catalog: Catalog) -> Self {
        // SizedCache panics on a zero size
        let cache_size = settings.search.cache_size.max(1);
        Self {
            settings: Arc::new(settings),
            catalog: Arc::new(catalog),
            search_cache: Arc::new(Mutex::new(SizedCache::with_size(cache_size))),
        }
    }
}
