//! Request logging middleware.

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Requests slower than this are logged at `warn`.
const SLOW_REQUEST: Duration = Duration::from_secs(1);

/// Logs method, path, status and latency of every request.
///
/// Server errors and slow requests are logged at `warn`, everything else at `info`.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let start = Instant::now();

    let response = next.run(request).await;

    let elapsed = start.elapsed();
    let status = response.status();

    if status.is_server_error() || elapsed >= SLOW_REQUEST {
        warn!(
            target: "http",
            method = %method,
            path = %path,
            status = status.as_u16(),
            duration_ms = elapsed.as_millis() as u64,
            "HTTP request completed"
        );
    } else {
        info!(
            target: "http",
            method = %method,
            path = %path,
            status = status.as_u16(),
            duration_ms = elapsed.as_millis() as u64,
            "HTTP request completed"
        );
    }

    response
}
