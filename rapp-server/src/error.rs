//! Error types for the HTTP API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rapp_core::RappError;
use serde::Serialize;
use std::fmt;

/// API error type
#[derive(Debug)]
pub enum ApiError {
    /// Not found (404)
    NotFound(String),

    /// PMS could not be reached or misbehaved (502)
    BadGateway(String),

    /// Error from the rApp core
    Core(RappError),

    /// Request body is not valid JSON for the endpoint
    SerializationError(serde_json::Error),
}

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::BadGateway(msg) => write!(f, "Bad gateway: {}", msg),
            ApiError::Core(e) => write!(f, "rApp error: {}", e),
            ApiError::SerializationError(e) => write!(f, "Serialization error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<RappError> for ApiError {
    fn from(err: RappError) -> Self {
        ApiError::Core(err)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::SerializationError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, "bad_gateway", msg),
            ApiError::Core(e) if e.is_upstream() => {
                (StatusCode::BAD_GATEWAY, "upstream_error", e.to_string())
            }
            ApiError::Core(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", e.to_string())
            }
            ApiError::SerializationError(e) => {
                let msg = format!("Invalid JSON: {}", e);
                (StatusCode::BAD_REQUEST, "invalid_json", msg)
            }
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
        });

        (status, body).into_response()
    }
}
