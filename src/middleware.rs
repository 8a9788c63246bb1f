//! Per-request tracing.
//!
//! Each request runs inside a `request` span tagged with a fresh UUID v4 so
//! log lines from one probe can be grouped. The response is returned as is.

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::Instrument;
use uuid::Uuid;

/// Wrap the request in a span and log its outcome at debug level.
pub async fn trace_request(request: Request, next: Next) -> Response {
    let span = tracing::debug_span!(
        "request",
        id = %Uuid::new_v4(),
        method = %request.method(),
        path = %request.uri().path(),
    );

    let start = Instant::now();
    let response = next.run(request).instrument(span.clone()).await;

    span.in_scope(|| {
        tracing::debug!(
            status = response.status().as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Request completed"
        )
    });

    response
}
