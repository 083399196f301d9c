//! Custom extractors for Axum handlers.
//!
//! These route extraction failures through [`AppError`](crate::AppError) so
//! every error body shares the same shape.

pub mod json_body;

pub use json_body::JsonBody;
