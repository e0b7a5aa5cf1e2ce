//! Relay error types and response formatting.

use std::time::Duration;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::header::RETRY_AFTER;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use zanalytics_domain::AnalyticsError;

/// Relay error type that converts to appropriate HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// Missing or malformed request input.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Client exhausted its request window.
    #[error("rate limited, window resets in {}s", retry_after.as_secs())]
    RateLimited { retry_after: Duration },

    /// Failure from the analytics client.
    #[error(transparent)]
    Upstream(#[from] AnalyticsError),
}

impl From<JsonRejection> for RelayError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for RelayError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// JSON error response body.
#[derive(Debug, Clone, Serialize)]
struct ErrorResponse {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    /// Upstream error envelope, when it was JSON
    #[serde(skip_serializing_if = "Option::is_none")]
    upstream: Option<Value>,
}

impl ErrorResponse {
    fn new(error: &'static str, message: impl Into<String>) -> Self {
        Self { error, code: None, message: Some(message.into()), upstream: None }
    }

    fn upstream(error: &'static str, code: i64, message: String, body: &str) -> Self {
        Self {
            error,
            code: Some(code),
            message: Some(message),
            upstream: serde_json::from_str(body).ok(),
        }
    }
}

fn upstream_status(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY)
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new("bad_request", msg)),
            Self::RateLimited { retry_after } => {
                let body = ErrorResponse::new(
                    "rate_limited",
                    "Too many requests, please try again later.",
                );
                let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();
                response
                    .headers_mut()
                    .insert(RETRY_AFTER, HeaderValue::from(retry_after.as_secs().max(1)));
                return response;
            }
            Self::Upstream(AnalyticsError::Api { status, code, message, body }) => {
                tracing::warn!(status, code, message = %message, "upstream rejected request");
                (upstream_status(status), ErrorResponse::upstream("upstream_error", code, message, &body))
            }
            Self::Upstream(AnalyticsError::TokenRejected { status, code, message, body }) => {
                tracing::error!(status, code, "upstream rejected the refreshed access token");
                (upstream_status(status), ErrorResponse::upstream("token_rejected", code, message, &body))
            }
            Self::Upstream(AnalyticsError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::new("bad_request", msg))
            }
            Self::Upstream(err) => {
                tracing::error!(kind = err.kind(), error = %err, "relayed call failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("internal_error", "An internal error occurred"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
