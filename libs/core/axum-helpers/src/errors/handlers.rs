use axum::{http::StatusCode, response::Response};

use super::error_response;

/// Handler for unmatched routes.
///
/// This can be used as a fallback handler in your router.
pub async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Route not found")
}
