//! Error types for Folia server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    Invalid(#[from] validator::ValidationErrors),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    /// Per-field validation details, present on invalid input
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message, details) = match &self {
            AppError::Authentication(msg) => {
                (StatusCode::UNAUTHORIZED, "authentication", msg.clone(), None)
            }
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, "not_found", msg.clone(), None)
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "validation", msg.clone(), None)
            }
            AppError::Invalid(errors) => (
                StatusCode::BAD_REQUEST,
                "validation",
                "Validation failed".to_string(),
                serde_json::to_value(errors).ok(),
            ),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database",
                    "Database error".to_string(),
                    None,
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        let cases = [
            (
                AppError::Authentication("bad token".to_string()),
                StatusCode::UNAUTHORIZED,
            ),
            (
                AppError::NotFound("no such row".to_string()),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::Validation("bad input".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Internal("broken".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_database_error_is_internal() {
        let err = AppError::Database(sqlx::Error::RowNotFound);
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
