// Route definitions

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::AppState;

// Declare submodules for different route groups
mod api;

// create_router accepts the AppState and returns a Router with the state already applied
pub fn create_router(app_state: AppState) -> Router {
    let api_router = Router::new()
        // Discovery
        .route("/vehicles", get(api::list_vehicles))
        .route("/vehicles/search", post(api::search_vehicles))
        .route("/vehicles/export", post(api::export_vehicles))
        .route("/vehicles/:id", get(api::get_vehicle))
        .route("/filters", get(api::get_filter_options))
        // Finance
        .route("/emi", post(api::calculate_emi))
        .route("/emi/quote", post(api::quote_emi))
        // Comparison
        .route("/compare", post(api::compare_vehicles))
        .with_state(app_state);

    Router::new()
        .nest("/api", api_router)
        .layer(TraceLayer::new_for_http())
}
