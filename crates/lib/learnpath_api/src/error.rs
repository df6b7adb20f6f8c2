//! Application error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
///
/// Nothing is recovered locally: every failure becomes a caller-visible
/// status and message, with internal detail logged but not returned.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Schema validation failed: {0}")]
    SchemaValidation(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal server error")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, err, message) = match &self {
            AppError::Validation(m) => (StatusCode::BAD_REQUEST, "validation_error", m.as_str()),
            AppError::Conflict(m) => (StatusCode::CONFLICT, "conflict", m.as_str()),
            AppError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, "unauthorized", m.as_str()),
            AppError::SchemaValidation(m) => {
                (StatusCode::BAD_GATEWAY, "schema_validation", m.as_str())
            }
            AppError::Upstream(m) => (StatusCode::BAD_GATEWAY, "upstream_error", m.as_str()),
            AppError::Internal(detail) => {
                // Log the detail, return a generic message.
                error!(%detail, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error.",
                )
            }
        };
        let body = Json(ErrorResponse {
            error: err.to_string(),
            message: message.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl From<learnpath_core::auth::AuthError> for AppError {
    fn from(e: learnpath_core::auth::AuthError) -> Self {
        use learnpath_core::auth::AuthError;
        match e {
            AuthError::TokenError(msg) => AppError::Internal(msg),
            AuthError::DbError(e) => AppError::from(e),
            AuthError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<learnpath_core::roadmap::RoadmapError> for AppError {
    fn from(e: learnpath_core::roadmap::RoadmapError) -> Self {
        use learnpath_core::roadmap::RoadmapError;
        match e {
            RoadmapError::Schema(msg) => AppError::SchemaValidation(msg),
            RoadmapError::Model(msg) => AppError::Upstream(msg),
        }
    }
}

impl From<learnpath_core::video::VideoError> for AppError {
    fn from(e: learnpath_core::video::VideoError) -> Self {
        AppError::Upstream(e.to_string())
    }
}
