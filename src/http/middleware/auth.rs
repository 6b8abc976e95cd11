//! Shared-secret authentication filter.
//!
//! Every request must carry `x-api-key` equal to the configured key. Anything
//! else is answered with 401 before routing, so no handler runs.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use subtle::ConstantTimeEq;

use crate::http::error::ApiError;
use crate::http::server::AppState;

pub const API_KEY_HEADER: &str = "x-api-key";

pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let rejection = match request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
    {
        Some(key) if key_matches(key, &state.api_key) => None,
        Some(_) => Some("invalid"),
        None => Some("missing"),
    };

    match rejection {
        None => Ok(next.run(request).await),
        Some(reason) => {
            tracing::warn!(
                path = %request.uri().path(),
                reason,
                "Rejected request without a valid API key"
            );
            Err(ApiError::Unauthorized)
        }
    }
}

fn key_matches(provided: &str, expected: &str) -> bool {
    provided.as_bytes().ct_eq(expected.as_bytes()).into()
}
