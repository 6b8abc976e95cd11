//! Error translation.
//!
//! Every failure a handler, extractor or filter surfaces is an [`ApiError`].
//! Converting it into a response is the last step of the pipeline: the detail
//! is logged and the client receives the declared status with a uniform
//! `{"message": ...}` body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::products::StoreError;

pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized: Invalid API Key";
pub const MISSING_FIELDS_MESSAGE: &str = "All product fields are required";
pub const NOT_FOUND_MESSAGE: &str = "Product not found";
pub const ROUTE_NOT_FOUND_MESSAGE: &str = "Route not found";
pub const TIMEOUT_MESSAGE: &str = "Request timed out";
pub const INTERNAL_MESSAGE: &str = "Internal Server Error";

pub type ApiResult<T> = Result<T, ApiError>;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: Invalid API Key")]
    Unauthorized,

    #[error("{0}")]
    Validation(String),

    /// The request could not be decoded (bad JSON, bad query string,
    /// oversized body, wrong content type).
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    #[error("Product not found")]
    NotFound,

    #[error("Route not found")]
    RouteNotFound,

    #[error("Request timed out")]
    Timeout,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

impl ApiError {
    pub fn missing_fields() -> Self {
        ApiError::Validation(MISSING_FIELDS_MESSAGE.to_string())
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Rejected { status, .. } => *status,
            ApiError::NotFound | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::Timeout => StatusCode::REQUEST_TIMEOUT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to send to the client. Internal details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            ApiError::Internal(_) => INTERNAL_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "Request failed");
        } else {
            tracing::debug!(status = %status, error = %self, "Request rejected");
        }

        let body = ErrorBody {
            message: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => ApiError::NotFound,
            StoreError::Poisoned => ApiError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_of(err: ApiError) -> (StatusCode, ErrorBody) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_status_and_message_mapping() {
        let (status, body) = body_of(ApiError::Unauthorized).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body.message, "Unauthorized: Invalid API Key");

        let (status, body) = body_of(ApiError::missing_fields()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.message, "All product fields are required");

        let (status, body) = body_of(ApiError::NotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.message, "Product not found");

        let (status, body) = body_of(ApiError::Timeout).await;
        assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
        assert_eq!(body.message, TIMEOUT_MESSAGE);
    }

    #[tokio::test]
    async fn test_internal_detail_is_not_leaked() {
        let (status, body) = body_of(ApiError::Internal("lock poisoned at 0xdead".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.message, "Internal Server Error");
    }

    #[tokio::test]
    async fn test_rejection_keeps_declared_status() {
        let err = ApiError::Rejected {
            status: StatusCode::PAYLOAD_TOO_LARGE,
            message: "too big".into(),
        };
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body.message, "too big");
    }

    #[test]
    fn test_store_errors_convert() {
        assert!(matches!(
            ApiError::from(StoreError::NotFound("9".into())),
            ApiError::NotFound
        ));
        assert!(matches!(
            ApiError::from(StoreError::Poisoned),
            ApiError::Internal(_)
        ));
    }
}
