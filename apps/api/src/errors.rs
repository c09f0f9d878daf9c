use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extract::ExtractError;
use crate::vector_store::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Lower-layer errors (`ExtractError`, `LlmError`, `StoreError`) convert into
/// these variants without being downgraded to a generic failure: callers can
/// tell a missing user from a missing resume from a missing HR contact.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("User not found: {0}")]
    UnknownUser(String),

    #[error("Resume not found for user: {0}")]
    ResumeNotFound(String),

    #[error("HR contact not found: {0}")]
    JobContextNotFound(String),

    #[error("Embedding provider error: {0}")]
    EmbeddingProvider(String),

    #[error("Malformed generation output: {0}")]
    MalformedGenerationOutput(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Conflict(msg) => AppError::Conflict(msg),
            StoreError::Unavailable(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Extract(e) => {
                let code = if matches!(e, ExtractError::ParseFailure { .. }) {
                    "PARSE_FAILURE"
                } else {
                    "VALIDATION_ERROR"
                };
                (StatusCode::BAD_REQUEST, code, e.to_string())
            }
            AppError::UnknownUser(_) => (StatusCode::NOT_FOUND, "USER_NOT_FOUND", self.to_string()),
            AppError::ResumeNotFound(_) => {
                (StatusCode::NOT_FOUND, "RESUME_NOT_FOUND", self.to_string())
            }
            AppError::JobContextNotFound(_) => {
                (StatusCode::NOT_FOUND, "HR_CONTACT_NOT_FOUND", self.to_string())
            }
            AppError::EmbeddingProvider(msg) => {
                tracing::error!("Embedding provider error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "EMBEDDING_PROVIDER_ERROR",
                    "The embedding provider request failed".to_string(),
                )
            }
            AppError::MalformedGenerationOutput(msg) => {
                tracing::error!("Malformed generation output: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "MALFORMED_GENERATION_OUTPUT",
                    "The language model returned an invalid email payload".to_string(),
                )
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORE_UNAVAILABLE",
                    "A storage error occurred".to_string(),
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
