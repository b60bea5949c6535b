//! Error handling for the Retail Back-Office Platform
//!
//! Provides a consistent JSON error envelope for every failure mode. Store
//! errors are translated at the boundary: constraint violations surface as
//! client errors, pool/lock contention as retryable server errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Business logic errors
    #[error("Insufficient stock: {0}")]
    InsufficientStock(String),

    // Store-level errors
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Transient store error: {0}")]
    TransientStore(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                AppError::TransientStore("database connection unavailable".to_string())
            }
            sqlx::Error::Database(db) => match db.code().as_deref() {
                // foreign_key_violation, unique_violation
                Some("23503") | Some("23505") => {
                    AppError::ConstraintViolation("duplicate or invalid reference".to_string())
                }
                // lock_not_available, serialization_failure, deadlock_detected
                Some("55P03") | Some("40001") | Some("40P01") => {
                    AppError::TransientStore("database lock contention".to_string())
                }
                _ => AppError::Database(sqlx::Error::Database(db)),
            },
            other => AppError::Database(other),
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message: message.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::ValidationError(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message: msg.clone(),
                    field: None,
                },
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "NOT_FOUND".to_string(),
                    message: format!("{} not found", resource),
                    field: None,
                },
            ),
            AppError::InsufficientStock(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    code: "INSUFFICIENT_STOCK".to_string(),
                    message: msg.clone(),
                    field: None,
                },
            ),
            AppError::ConstraintViolation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "CONSTRAINT_VIOLATION".to_string(),
                    message: msg.clone(),
                    field: None,
                },
            ),
            AppError::TransientStore(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorDetail {
                    code: "TRANSIENT_STORE_ERROR".to_string(),
                    message: format!("{} - please retry", msg),
                    field: None,
                },
            ),
            AppError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "DATABASE_ERROR".to_string(),
                    message: "A database error occurred".to_string(),
                    field: None,
                },
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred".to_string(),
                    field: None,
                },
            ),
        };

        // Log the error for diagnosis
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
