pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Body returned by the catch-all error path.
///
/// ```json
/// { "status": "error", "message": "Name is required and cannot be empty" }
/// ```
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `"error"`
    pub status: String,
    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
        }
    }
}

/// Body returned when a handler reports a missing resource.
///
/// ```json
/// { "message": "User not found" }
/// ```
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Application error type that can be converted to HTTP responses.
///
/// The status code is chosen by matching on the variant; domain crates map
/// their own error enums into one of these kinds.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    /// A request argument failed a precondition or validation rule.
    ///
    /// Rendered as 500 to stay wire-compatible with existing clients.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::JsonExtractorRejection(e) => e.status(),
            AppError::InvalidArgument(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> ErrorCode {
        match self {
            AppError::JsonExtractorRejection(_) => ErrorCode::JsonExtraction,
            AppError::InvalidArgument(_) => ErrorCode::InvalidArgument,
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::InternalServerError(_) => ErrorCode::InternalError,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.error_code();

        match self {
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(
                    error_code = code.code(),
                    error_kind = %code,
                    "JSON extraction error: {:?}",
                    e
                );
                (status, Json(ErrorResponse::new(e.body_text()))).into_response()
            }
            AppError::InvalidArgument(msg) => {
                tracing::info!(
                    error_code = code.code(),
                    error_kind = %code,
                    "Invalid argument: {}",
                    msg
                );
                (status, Json(ErrorResponse::new(msg))).into_response()
            }
            AppError::NotFound(msg) => {
                tracing::info!(
                    error_code = code.code(),
                    error_kind = %code,
                    "Not found: {}",
                    msg
                );
                (status, Json(MessageResponse { message: msg })).into_response()
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(
                    error_code = code.code(),
                    error_kind = %code,
                    "Internal server error: {}",
                    msg
                );
                (status, Json(ErrorResponse::new(msg))).into_response()
            }
        }
    }
}

/// Helper function to create `{status: "error", message}` responses.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorResponse::new(message))).into_response()
}
