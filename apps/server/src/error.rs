//! Domain error types for Test Review Hub.
//!
//! Uses thiserror for ergonomic error handling with automatic Display implementations.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use sea_orm::{DbErr, SqlErr};
use std::fmt;

/// Application-level errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Missing or malformed required field
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Referenced resource does not exist
    #[error("{0} not found")]
    NotFound(String),

    /// Duplicate write against a unique constraint (outside the upsert path)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Uploaded report could not be parsed as JSON
    #[error("Malformed report: {0}")]
    MalformedInput(String),

    /// Request body exceeds the configured upload limit
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Body sent with a content type the endpoint does not accept
    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// Identity verification failed
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Server-side failure outside the database (signing, hashing, task join)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable machine-readable code used in the response body.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::MalformedInput(_) => "MALFORMED_INPUT",
            AppError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            AppError::UnsupportedMediaType(_) => "UNSUPPORTED_MEDIA_TYPE",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::MalformedInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::Database(err_str) => {
                tracing::error!("Database error: {}", err_str);
                "An internal database error occurred".to_string()
            }
            AppError::Internal(err_str) => {
                tracing::error!("Internal error: {}", err_str);
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.code().to_string(),
            message,
        })
    }
}

/// Error response body matching OpenAPI schema.
#[derive(Debug, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

/// Failure of a fail-soft query path (summaries, file listing).
///
/// Handlers translate this into an empty result flagged as degraded instead
/// of a 5xx, so a broken database looks like "no data" to naive clients.
/// Callers that need to distinguish the two cases get the error itself.
#[derive(Debug, thiserror::Error)]
pub enum AggregationError {
    #[error("aggregation query failed: {0}")]
    Query(String),
}

impl From<AppError> for AggregationError {
    fn from(err: AppError) -> Self {
        AggregationError::Query(err.to_string())
    }
}

impl From<DbErr> for AggregationError {
    fn from(err: DbErr) -> Self {
        AggregationError::Query(err.to_string())
    }
}

// Conversion implementations for common error types

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedInput(format!("JSON parsing error: {}", err))
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => AppError::Conflict(detail),
            _ => AppError::Database(err.to_string()),
        }
    }
}
