//! Health check endpoint for container orchestration.
//!
//! Liveness only: it answers as long as the process can serve HTTP.

/// Health check handler.
///
/// Returns the fixed body `OK` for every request, regardless of method,
/// headers, query or body.
pub async fn health() -> &'static str {
    "OK"
}
