//! Request logging filter.
//!
//! Logs the arrival time, method and path of every request, then the status
//! and latency once the response is ready. Never rejects.

use std::time::{Instant, SystemTime};

use axum::{extract::Request, middleware::Next, response::Response};

use crate::observability::metrics;

pub async fn log_requests(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let timestamp = humantime::format_rfc3339_millis(SystemTime::now());
    let method = request.method().clone();
    let path = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    tracing::info!(
        timestamp = %timestamp,
        request_id = %request_id,
        method = %method,
        path = %path,
        "Request received"
    );

    let response = next.run(request).await;
    let status = response.status();

    tracing::info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        status = status.as_u16(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Request completed"
    );
    metrics::record_request(method.as_str(), status.as_u16(), start);

    response
}
