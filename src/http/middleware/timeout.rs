//! Request deadline filter.
//!
//! A request still running when the configured limit expires is answered
//! with 408 and the usual JSON error body.

use std::time::Duration;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tokio::time::timeout;

use crate::http::error::ApiError;

pub async fn enforce_timeout(
    State(limit): State<Duration>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let path = request.uri().path().to_string();

    match timeout(limit, next.run(request)).await {
        Ok(response) => Ok(response),
        Err(_) => {
            tracing::warn!(path = %path, limit_ms = limit.as_millis() as u64, "Request timed out");
            Err(ApiError::Timeout)
        }
    }
}
