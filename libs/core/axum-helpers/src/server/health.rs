use axum::{Json, Router, http::StatusCode, response::IntoResponse, routing::get};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Liveness payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

/// Root payload pointing callers at the liveness endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RootResponse {
    pub message: String,
}

/// Liveness check. Always 200 while the process is serving requests.
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "OK".to_string(),
            message: "API is running".to_string(),
        }),
    )
}

pub async fn root_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(RootResponse {
            message: "GO to /health to check if the API is running".to_string(),
        }),
    )
}

/// Creates a stateless router with `/health` and `/`.
pub fn health_router() -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/", get(root_handler))
}
