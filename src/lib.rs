//! Pulse - a single-endpoint health check service.
//!
//! Reads `PORT` and `SERVICE` from the environment and answers `OK` on
//! `/health` for any method.

pub mod config;
pub mod http;
pub mod middleware;
pub mod routes;

pub use config::{Config, ConfigError};
pub use http::{serve, start_server, ServerError};
pub use routes::create_router;
