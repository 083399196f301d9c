//! Reusable OpenAPI response types for consistent API documentation.

use super::{ErrorResponse, MessageResponse};
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error (also returned for invalid arguments)",
    content_type = "application/json",
    example = json!({
        "status": "error",
        "message": "Name is required and cannot be empty"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "message": "User not found"
    })
)]
pub struct NotFoundResponse(pub MessageResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Malformed JSON body",
    content_type = "application/json",
    example = json!({
        "status": "error",
        "message": "Failed to parse the request body as JSON"
    })
)]
pub struct BadRequestJsonResponse(pub ErrorResponse);
