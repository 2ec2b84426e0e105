//! Error handling module for the GameReady backend.
//!
//! Centralized error taxonomy with mapping to HTTP status codes and the
//! response envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const CONFLICT: &str = "CONFLICT";
    pub const INVALID_METRIC_RANGE: &str = "INVALID_METRIC_RANGE";
    pub const TAG_OWNERSHIP_MISMATCH: &str = "TAG_OWNERSHIP_MISMATCH";
    pub const MALFORMED_JOIN_CODE: &str = "MALFORMED_JOIN_CODE";
    pub const JOIN_CODE_NOT_FOUND: &str = "JOIN_CODE_NOT_FOUND";
    pub const JOIN_CODE_EXHAUSTED: &str = "JOIN_CODE_EXHAUSTED";
    pub const PAYLOAD_TOO_LARGE: &str = "PAYLOAD_TOO_LARGE";
    pub const UNSUPPORTED_MEDIA_TYPE: &str = "UNSUPPORTED_MEDIA_TYPE";
    pub const DATABASE_ERROR: &str = "DATABASE_ERROR";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Authentication required
    Unauthorized(String),
    /// Resource not found
    NotFound(String),
    /// Request failed validation
    Validation(String),
    /// Write conflicts with an existing row (e.g. a second report for the
    /// same athlete and day)
    Conflict(String),
    /// A metric outside 1-10 reached the scorer. Never clamped: a clamped
    /// value would corrupt the score contract.
    InvalidMetricRange { metric: &'static str, value: u8 },
    /// A schedule write referenced a tag owned by a different team
    TagOwnershipMismatch(String),
    /// Submitted join code fails the format check
    MalformedJoinCode(String),
    /// Well-formed join code with no matching team
    JoinCodeNotFound,
    /// Code generation ran out of attempts
    JoinCodeExhausted,
    /// Upload exceeds the size or quota limit
    PayloadTooLarge(String),
    /// Upload content failed the image sniff
    UnsupportedMediaType(String),
    /// Database error
    Database(String),
    /// Internal server error
    Internal(String),
    /// Bad request
    BadRequest(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InvalidMetricRange { .. } => StatusCode::BAD_REQUEST,
            AppError::TagOwnershipMismatch(_) => StatusCode::BAD_REQUEST,
            AppError::MalformedJoinCode(_) => StatusCode::BAD_REQUEST,
            AppError::JoinCodeNotFound => StatusCode::NOT_FOUND,
            AppError::JoinCodeExhausted => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Unauthorized(_) => codes::UNAUTHORIZED,
            AppError::NotFound(_) => codes::NOT_FOUND,
            AppError::Validation(_) => codes::VALIDATION_ERROR,
            AppError::Conflict(_) => codes::CONFLICT,
            AppError::InvalidMetricRange { .. } => codes::INVALID_METRIC_RANGE,
            AppError::TagOwnershipMismatch(_) => codes::TAG_OWNERSHIP_MISMATCH,
            AppError::MalformedJoinCode(_) => codes::MALFORMED_JOIN_CODE,
            AppError::JoinCodeNotFound => codes::JOIN_CODE_NOT_FOUND,
            AppError::JoinCodeExhausted => codes::JOIN_CODE_EXHAUSTED,
            AppError::PayloadTooLarge(_) => codes::PAYLOAD_TOO_LARGE,
            AppError::UnsupportedMediaType(_) => codes::UNSUPPORTED_MEDIA_TYPE,
            AppError::Database(_) => codes::DATABASE_ERROR,
            AppError::Internal(_) => codes::INTERNAL_ERROR,
            AppError::BadRequest(_) => codes::BAD_REQUEST,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            AppError::Unauthorized(msg)
            | AppError::NotFound(msg)
            | AppError::Validation(msg)
            | AppError::Conflict(msg)
            | AppError::TagOwnershipMismatch(msg)
            | AppError::MalformedJoinCode(msg)
            | AppError::PayloadTooLarge(msg)
            | AppError::UnsupportedMediaType(msg)
            | AppError::Database(msg)
            | AppError::Internal(msg)
            | AppError::BadRequest(msg) => msg.clone(),
            AppError::InvalidMetricRange { metric, value } => {
                format!("{} must be between 1 and 10, got {}", metric, value)
            }
            AppError::JoinCodeNotFound => "No team matches this join code".to_string(),
            AppError::JoinCodeExhausted => {
                "Could not generate a unique join code".to_string()
            }
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Database error: {:?}", err);
        AppError::Database(format!("Database error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("Stored JSON error: {:?}", err);
        AppError::Database(format!("Invalid stored JSON: {}", err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!("I/O error: {:?}", err);
        AppError::Internal(format!("I/O error: {}", err))
    }
}

/// Error details in the response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Error response envelope.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetails,
}

impl ErrorResponse {
    pub fn new(error: &AppError) -> Self {
        let details = match error {
            AppError::InvalidMetricRange { metric, value } => {
                Some(serde_json::json!({ "metric": metric, "value": value }))
            }
            _ => None,
        };

        Self {
            success: false,
            error: ErrorDetails {
                code: error.error_code().to_string(),
                message: error.message(),
                details,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse::new(&self);
        (status, Json(body)).into_response()
    }
}
