//! Error handling for route handlers.
//!
//! All route handlers return `Result<T, AppError>`. Lookups that miss answer
//! `404` with an empty JSON object, the body the stock oracle contract
//! treats as "no record".

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Application-level error type for the oracle server.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            Self::NotFound(what) => {
                tracing::debug!(resource = %what, "Lookup missed");
                (StatusCode::NOT_FOUND, Json(serde_json::json!({}))).into_response()
            }
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
