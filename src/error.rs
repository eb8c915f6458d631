//! Error types for the gateway
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Gateway Error Enum ==
/// Unified error type for the gateway.
///
/// An absent record is not an error inside the services (they return `None`);
/// `NotFound` only exists so handlers can turn a `None` into a 404.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Requested resource does not exist
    #[error("{0}")]
    NotFound(String),

    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Cache store unreachable or a cache command failed
    #[error("Cache unavailable: {0}")]
    CacheUnavailable(String),

    /// Search backend unreachable or returned an unexpected response
    #[error("Search backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Cache key could not be built from the given parts
    #[error("Invalid cache key arguments: {0}")]
    InvalidKeyArgs(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match &self {
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            GatewayError::CacheUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            GatewayError::BackendUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            GatewayError::InvalidKeyArgs(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the gateway.
pub type Result<T> = std::result::Result<T, GatewayError>;
