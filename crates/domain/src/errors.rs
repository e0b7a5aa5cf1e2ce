//! Error types used throughout the client and relay

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for analytics operations
///
/// Every pipeline call fails with exactly one of these variants. None of them
/// is retried by the pipeline except the token-expired case, which never
/// surfaces as an `Api` error (it becomes `TokenRejected` if the retry also
/// expires).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    /// Refresh-token exchange failed.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The single retry after a refresh reported an expired token again.
    ///
    /// Carries the upstream response of the retry so it can be relayed.
    #[error("Authentication error: access token rejected after refresh (HTTP {status}, code {code}): {message}")]
    TokenRejected { status: u16, code: i64, message: String, body: String },

    /// Upstream returned a non-2xx status with an application error code.
    ///
    /// `body` is the raw upstream error body.
    #[error("API error {code} (HTTP {status}): {message}")]
    Api { status: u16, code: i64, message: String, body: String },

    /// Connection failure or a response body that could not be parsed.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Local file could not be read (import) or written (export).
    #[error("I/O error on {}: {message}", path.display())]
    Io { path: PathBuf, message: String },

    /// Caller omitted a required identifier or field.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Process configuration is incomplete or malformed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AnalyticsError {
    /// Build an `Io` error from a path and the underlying I/O failure.
    pub fn io(path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        Self::Io { path: path.into(), message: err.to_string() }
    }

    /// Stable label suitable for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Auth(_) | Self::TokenRejected { .. } => "auth",
            Self::Api { .. } => "api",
            Self::Transport(_) => "transport",
            Self::Io { .. } => "io",
            Self::Validation(_) => "validation",
            Self::Config(_) => "config",
        }
    }

    /// Upstream HTTP status, when the failure came from an upstream response.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::TokenRejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Upstream application error code, if any.
    pub fn error_code(&self) -> Option<i64> {
        match self {
            Self::Api { code, .. } | Self::TokenRejected { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Raw upstream error body, if any.
    pub fn upstream_body(&self) -> Option<&str> {
        match self {
            Self::Api { body, .. } | Self::TokenRejected { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Result type alias for analytics operations
pub type Result<T> = std::result::Result<T, AnalyticsError>;
