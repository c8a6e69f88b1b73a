// Error types for the service and its domain boundaries
// The discovery core itself is total; these only surface at the edges.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

// Rejected comparison selections (checked before insights are derived)
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Select at least one vehicle to compare")]
    Empty,

    #[error("You can compare at most {max} vehicles (got {got})")]
    TooMany { max: usize, got: usize },

    #[error("Vehicle {0} is selected more than once")]
    Duplicate(u32),

    #[error("Vehicle {0} is not in the catalog")]
    UnknownVehicle(u32),
}

// Filter criteria that break the `min <= max` invariant
#[derive(Debug, Error, PartialEq)]
pub enum CriteriaError {
    #[error("Invalid {dimension} range: min {min} is greater than max {max}")]
    InvertedRange { dimension: String, min: f64, max: f64 },
}

// Problems found while ingesting the inventory file
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse catalog CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unsupported catalog format: {0}")]
    UnsupportedFormat(String),

    #[error("Duplicate vehicle id {0} in catalog")]
    DuplicateId(u32),
}

// Application error type returned by the HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Internal server error: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<SelectionError> for AppError {
    fn from(error: SelectionError) -> Self {
        AppError::BadRequest(error.to_string())
    }
}

impl From<CriteriaError> for AppError {
    fn from(error: CriteriaError) -> Self {
        AppError::BadRequest(error.to_string())
    }
}

// Implement IntoResponse for AppError to convert errors into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InternalServerError(e) => {
                // Log the detailed error here
                tracing::error!("Internal server error: {:?}", e);
                // Don't expose internal details to the client
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
            AppError::BadRequest(message) => {
                tracing::warn!("Rejected request: {}", message);
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::NotFound(message) => {
                tracing::debug!("Not found: {}", message);
                (StatusCode::NOT_FOUND, message)
            }
        };

        let body = Json(json!({ "success": false, "error": error_message }));
        (status, body).into_response()
    }
}

// Define a custom Result type using our AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_errors_become_bad_requests() {
        let err: AppError = SelectionError::TooMany { max: 4, got: 6 }.into();
        match err {
            AppError::BadRequest(msg) => assert!(msg.contains("at most 4")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn status_codes_match_variants() {
        let resp = AppError::NotFound("vehicle 9".into()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let resp = AppError::BadRequest("nope".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let resp = AppError::from(anyhow::anyhow!("boom")).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
