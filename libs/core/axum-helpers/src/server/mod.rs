//! Server infrastructure module.
//!
//! This module provides:
//! - Application setup with OpenAPI documentation
//! - Liveness and root endpoints
//! - Graceful shutdown on SIGINT/SIGTERM
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{create_app, create_router};
//! use axum_helpers::http::create_permissive_cors_layer;
//! use core_config::server::ServerConfig;
//!
//! let router = create_router::<ApiDoc>(api_routes, create_permissive_cors_layer());
//! create_app(router, &ServerConfig::default()).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{create_app, create_router};
pub use health::{HealthResponse, RootResponse, health_handler, health_router, root_handler};
pub use shutdown::shutdown_signal;
