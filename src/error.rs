use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Error response type
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Response type for unhealthy status
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
}

/// Custom error type for API endpoints
///
/// Every variant renders as a JSON [`ErrorResponse`]. Store failures carry
/// a fixed message for the caller; the underlying error is only logged.
#[derive(Debug)]
pub enum ApiError {
    /// Invalid UUID format in path parameter
    InvalidUuid(String),
    /// Request body could not be decoded
    InvalidBody(String),
    /// No todo stored under this id
    TodoNotFound(Uuid),
    /// Key-value store operation failed
    Store {
        message: &'static str,
        source: anyhow::Error,
    },
}

impl ApiError {
    /// Build a closure that wraps a store error with a fixed public message
    pub fn store(message: &'static str) -> impl FnOnce(anyhow::Error) -> Self {
        move |source| ApiError::Store { message, source }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::InvalidUuid(id) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid UUID format: expected format like '550e8400-e29b-41d4-a716-446655440000', got '{}'", id),
            ),
            ApiError::InvalidBody(reason) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid request body: {}", reason),
            ),
            ApiError::TodoNotFound(id) => (
                StatusCode::NOT_FOUND,
                format!("Todo not found: {}", id),
            ),
            ApiError::Store { message, source } => {
                tracing::error!("{}: {:#}", message, source);
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}
