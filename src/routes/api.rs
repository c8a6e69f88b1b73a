// Handlers for backend API endpoints

use anyhow::{anyhow, Context};
use axum::{
    extract::{Json as JsonExtract, Path, State},
    http::header,
    response::{IntoResponse, Json},
};
use cached::Cached;
use serde::{Deserialize, Serialize};

use crate::{
    discovery::{discover, MatchOutcome},
    emi::{quote_with_down_payment, LoanQuote},
    error::{AppError, AppResult},
    export,
    facets::FilterOptions,
    insights::{derive_insights, Badge, InsightsSummary},
    models::{ComparisonSelection, LoanParameters, LoanResult, SearchRequest, Vehicle},
    value_parser::format_price,
    AppState, CachedSearch,
};

// --- Response Wrappers ---

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    success: bool,
    outcome: MatchOutcome,
    count: usize,
    message: Option<String>,
    vehicles: Vec<Vehicle>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparedVehicle {
    #[serde(flatten)]
    vehicle: Vehicle,
    price_amount: f64,
    mileage_km: f64,
    display_price: String,
    badges: Vec<Badge>,
    estimated_emi: LoanResult, // Default rate/term, minimum down payment
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareResponse {
    success: bool,
    vehicles: Vec<ComparedVehicle>,
    insights: InsightsSummary,
}

// --- Request Structs ---

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    vehicle_id: Option<u32>,
    car_price: Option<f64>,
    down_payment: Option<f64>,
    annual_rate_percent: Option<f64>,
    term_months: Option<i64>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CompareRequest {
    vehicle_ids: Vec<u32>,
}

// --- Search helpers ---

// Runs the discovery pipeline, memoised on the serialized request.
// The catalog never changes while the server runs, so the request alone is
// a complete cache key.
fn run_search<'a>(
    app_state: &'a AppState,
    request: &SearchRequest,
) -> AppResult<(Vec<&'a Vehicle>, MatchOutcome)> {
    request.criteria.validate()?;

    let key = serde_json::to_string(request).context("Failed to build search cache key")?;
    let catalog = app_state.catalog.as_ref();

    let mut cache = app_state
        .search_cache
        .lock()
        .map_err(|_| anyhow!("Search cache lock poisoned"))?;

    if let Some(hit) = cache.cache_get(&key) {
        tracing::debug!(key = %key, "Search cache hit");
        let vehicles = hit.ids.iter().filter_map(|id| catalog.get(*id)).collect();
        return Ok((vehicles, hit.outcome));
    }

    let discovery = discover(catalog.vehicles(), request, &app_state.settings.fuzzy_config());
    cache.cache_set(
        key,
        CachedSearch {
            ids: discovery.ids(),
            outcome: discovery.outcome,
        },
    );
    Ok((discovery.vehicles, discovery.outcome))
}

fn outcome_message(outcome: MatchOutcome, request: &SearchRequest) -> Option<String> {
    match outcome {
        MatchOutcome::Exact => None,
        MatchOutcome::FuzzyFallback => Some(format!(
            "No exact matches for \"{}\". Showing the closest vehicles instead.",
            request.trimmed_term()
        )),
        MatchOutcome::NoMatchForFilters => Some("No vehicles match the selected filters.".to_string()),
        MatchOutcome::NoMatchForSearch => Some(format!(
            "No vehicles found for \"{}\".",
            request.trimmed_term()
        )),
    }
}

// --- API Handlers ---

pub async fn list_vehicles(State(app_state): State<AppState>) -> impl IntoResponse {
    tracing::info!("API call: list_vehicles");
    Json(app_state.catalog.vehicles().to_vec())
}

pub async fn get_vehicle(
    State(app_state): State<AppState>,
    Path(id): Path<u32>,
) -> AppResult<Json<Vehicle>> {
    tracing::info!("API call: get_vehicle for id: {}", id);
    app_state
        .catalog
        .get(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Vehicle {} not found", id)))
}

pub async fn search_vehicles(
    State(app_state): State<AppState>,
    JsonExtract(request): JsonExtract<SearchRequest>,
) -> AppResult<Json<SearchResponse>> {
    tracing::info!("API call: search_vehicles with request: {:?}", request);

    let (vehicles, outcome) = run_search(&app_state, &request)?;
    tracing::info!("Search finished with {:?}, {} vehicles.", outcome, vehicles.len());

    Ok(Json(SearchResponse {
        success: true,
        outcome,
        count: vehicles.len(),
        message: outcome_message(outcome, &request),
        vehicles: vehicles.into_iter().cloned().collect(),
    }))
}

pub async fn export_vehicles(
    State(app_state): State<AppState>,
    JsonExtract(request): JsonExtract<SearchRequest>,
) -> AppResult<impl IntoResponse> {
    tracing::info!("API call: export_vehicles with request: {:?}", request);

    let (vehicles, _) = run_search(&app_state, &request)?;
    let body = export::to_csv_bytes(&vehicles)?;

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
    let file_name = export::export_file_name(&request, &timestamp);
    tracing::info!("Exporting {} vehicles as {}", vehicles.len(), file_name);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        body,
    ))
}

pub async fn get_filter_options(State(app_state): State<AppState>) -> Json<FilterOptions> {
    tracing::info!("API call: get_filter_options");
    Json(FilterOptions::from_catalog(app_state.catalog.vehicles()))
}

pub async fn calculate_emi(JsonExtract(params): JsonExtract<LoanParameters>) -> Json<LoanResult> {
    tracing::info!("API call: calculate_emi with params: {:?}", params);
    Json(params.compute())
}

pub async fn quote_emi(
    State(app_state): State<AppState>,
    JsonExtract(request): JsonExtract<QuoteRequest>,
) -> AppResult<Json<LoanQuote>> {
    tracing::info!("API call: quote_emi with request: {:?}", request);

    let car_price = match (request.vehicle_id, request.car_price) {
        (Some(id), _) => app_state
            .catalog
            .get(id)
            .map(|v| v.price_amount())
            .ok_or_else(|| AppError::NotFound(format!("Vehicle {} not found", id)))?,
        (None, Some(price)) => price,
        (None, None) => {
            return Err(AppError::BadRequest(
                "Either vehicleId or carPrice is required".to_string(),
            ));
        }
    };

    let loan = &app_state.settings.loan;
    let band = app_state.settings.down_payment_band();
    let down_payment = request.down_payment.unwrap_or_else(|| band.initial(car_price));

    Ok(Json(quote_with_down_payment(
        car_price,
        down_payment,
        request.annual_rate_percent.unwrap_or(loan.annual_rate_percent),
        request.term_months.unwrap_or(loan.term_months),
        &band,
    )))
}

pub async fn compare_vehicles(
    State(app_state): State<AppState>,
    JsonExtract(request): JsonExtract<CompareRequest>,
) -> AppResult<Json<CompareResponse>> {
    tracing::info!("API call: compare_vehicles for ids: {:?}", request.vehicle_ids);

    // Over-selection is refused here rather than silently truncated
    let selection = ComparisonSelection::new(request.vehicle_ids)?;
    let selected = selection.resolve(app_state.catalog.vehicles())?;
    let insights = derive_insights(&selected)
        .ok_or_else(|| AppError::BadRequest("Nothing to compare".to_string()))?;

    let loan = &app_state.settings.loan;
    let band = app_state.settings.down_payment_band();

    let vehicles = selected
        .iter()
        .map(|v| {
            let price = v.price_amount();
            let quote = quote_with_down_payment(
                price,
                band.initial(price),
                loan.annual_rate_percent,
                loan.term_months,
                &band,
            );
            ComparedVehicle {
                vehicle: (*v).clone(),
                price_amount: price,
                mileage_km: v.mileage_amount(),
                display_price: format_price(price),
                badges: insights.badges_for(v.id),
                estimated_emi: quote.loan,
            }
        })
        .collect();

    Ok(Json(CompareResponse {
        success: true,
        vehicles,
        insights: insights.summary(),
    }))
}
