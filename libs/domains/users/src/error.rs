use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use validator::ValidationErrors;

/// Failures raised by the users service and repository.
///
/// A missing user is not an error; lookups return `Option`/`bool` and the
/// handlers decide what absence means over HTTP.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UserError {
    /// Missing id or input that failed validation
    #[error("{0}")]
    InvalidArgument(String),

    /// Storage or other unexpected failure
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

/// Fields in the order their failures are reported; only the first is surfaced.
const FIELD_ORDER: [&str; 2] = ["name", "email"];

impl From<ValidationErrors> for UserError {
    fn from(errors: ValidationErrors) -> Self {
        let fields = errors.field_errors();
        let message = FIELD_ORDER
            .iter()
            .filter_map(|field| fields.get(*field))
            .flat_map(|field_errors| field_errors.iter())
            .find_map(|err| err.message.as_ref().map(|msg| msg.to_string()))
            .unwrap_or_else(|| errors.to_string());

        UserError::InvalidArgument(message)
    }
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::InvalidArgument(msg) => AppError::InvalidArgument(msg),
            UserError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
