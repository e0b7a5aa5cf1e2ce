//! Upstream response envelope
//!
//! Success bodies look like `{"status":"success","data":{..}}`; failures like
//! `{"status":"failure","summary":"..","data":{"errorCode":7103,"errorMessage":".."}}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::TOKEN_EXPIRED_CODE;
use crate::errors::AnalyticsError;

/// Failure envelope as returned with a non-2xx status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

/// Application-level error carried inside the envelope's `data`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetail {
    pub code: i64,
    pub message: String,
    /// Raw body the detail was read from
    pub body: String,
}

impl ErrorDetail {
    pub fn is_token_expired(&self) -> bool {
        self.code == TOKEN_EXPIRED_CODE
    }

    pub fn into_error(self, status: u16) -> AnalyticsError {
        AnalyticsError::Api { status, code: self.code, message: self.message, body: self.body }
    }

    /// Terminal error for an expiry reported again after a refresh.
    pub fn into_rejection(self, status: u16) -> AnalyticsError {
        AnalyticsError::TokenRejected {
            status,
            code: self.code,
            message: self.message,
            body: self.body,
        }
    }
}

impl ErrorEnvelope {
    /// Extract the error detail from a failure body.
    ///
    /// Bodies that are not JSON, or carry no recognisable code, yield code `0`
    /// with the raw body (or summary) as the message.
    pub fn detail_from_body(body: &str) -> ErrorDetail {
        let Ok(envelope) = serde_json::from_str::<Self>(body) else {
            return ErrorDetail { code: 0, message: body.trim().to_string(), body: body.to_string() };
        };

        let data = envelope.data.as_ref();
        let code = data.and_then(|d| d.get("errorCode")).and_then(code_as_i64).unwrap_or(0);
        let message = data
            .and_then(|d| d.get("errorMessage"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .or(envelope.summary)
            .unwrap_or_else(|| body.trim().to_string());

        ErrorDetail { code, message, body: body.to_string() }
    }
}

fn code_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
