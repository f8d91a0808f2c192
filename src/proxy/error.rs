//! HTTP service errors.
//!
//! Every failure is answered with
//! `{"error": {"type", "message", "request_id"}}` with a matching status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::preferences::PreferenceError;

#[derive(Debug, Error)]
pub enum ProxyError {
    /// Body is not JSON or a required field is missing.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Upstream not configured: {reason}")]
    UpstreamNotConfigured { reason: String },

    #[error("Connection to upstream failed: {source}")]
    ConnectionError {
        #[source]
        source: reqwest::Error,
    },

    #[error("Request timeout after {duration}s")]
    RequestTimeout { duration: u64 },

    /// Non-2xx from upstream; the status is passed through.
    #[error("Upstream error: {status} - {message}")]
    UpstreamError { status: u16, message: String },

    /// 2xx from upstream with an unusable body.
    #[error("Invalid upstream response: {0}")]
    InvalidUpstreamResponse(String),

    #[error(transparent)]
    Preferences(#[from] PreferenceError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProxyError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ProxyError::UpstreamNotConfigured { .. } => StatusCode::BAD_GATEWAY,
            ProxyError::ConnectionError { .. } => StatusCode::BAD_GATEWAY,
            ProxyError::RequestTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            ProxyError::UpstreamError { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ProxyError::InvalidUpstreamResponse(_) => StatusCode::BAD_GATEWAY,
            ProxyError::Preferences(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Value of `error.type` in the response body.
    pub fn error_type(&self) -> &'static str {
        match self {
            ProxyError::InvalidRequest(_) => "invalid_request",
            ProxyError::UpstreamNotConfigured { .. } => "upstream_not_configured",
            ProxyError::ConnectionError { .. } => "connection_error",
            ProxyError::RequestTimeout { .. } => "request_timeout",
            ProxyError::UpstreamError { .. } => "upstream_error",
            ProxyError::InvalidUpstreamResponse(_) => "invalid_upstream_response",
            ProxyError::Preferences(_) => "preferences_error",
            ProxyError::Internal(_) => "internal_error",
        }
    }
}

pub struct ErrorResponse;

impl ErrorResponse {
    pub fn from_error(err: &ProxyError, request_id: &str) -> Response {
        let body = serde_json::json!({
            "error": {
                "type": err.error_type(),
                "message": err.to_string(),
                "request_id": request_id
            }
        });

        (err.status_code(), Json(body)).into_response()
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let request_id = uuid::Uuid::new_v4().to_string();
        if self.status_code().is_server_error() {
            tracing::error!(%request_id, error = %self, "Request failed");
        } else {
            tracing::warn!(%request_id, error = %self, "Request rejected");
        }
        ErrorResponse::from_error(&self, &request_id)
    }
}
