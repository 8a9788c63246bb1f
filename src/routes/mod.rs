//! HTTP route handlers.
//!
//! The service exposes a single route, `/health`. Any other path is left to
//! the router's default not-found response.

pub mod health;

use axum::{middleware, routing::any, Router};

use crate::middleware::trace_request;

/// Path of the health check route
pub const HEALTH_PATH: &str = "/health";

/// Creates the Axum router.
pub fn create_router() -> Router {
    Router::new()
        .route(HEALTH_PATH, any(health::health))
        .layer(middleware::from_fn(trace_request))
}
