use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::proficiency::ParseLevelError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// The selected role cannot be analysed (it has no requirements).
    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Data integrity error: {0}")]
    DataIntegrity(#[from] ParseLevelError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::InvalidRole(msg) => {
                tracing::warn!("Invalid role: {msg}");
                (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_ROLE", msg.clone())
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::DataIntegrity(e) => {
                tracing::error!("Data integrity error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATA_INTEGRITY_ERROR",
                    "Stored reference data is malformed".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
