//! Configuration structures
//!
//! Loading lives in `zanalytics-infra::config`; these types only describe the
//! shape and defaults.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ACCOUNTS_SERVER_URL, DEFAULT_ANALYTICS_SERVER_URL, DEFAULT_BATCH_DELAY_SECS,
    DEFAULT_TIMEOUT_SECS,
};
use crate::errors::{AnalyticsError, Result};

/// OAuth client credentials plus the long-lived refresh token.
///
/// Immutable for the lifetime of the process.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

impl Credentials {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            refresh_token: refresh_token.into(),
        }
    }

    /// Fail with `Config` naming every empty field.
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<&str> = [
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("refresh_token", &self.refresh_token),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AnalyticsError::Config(format!("missing credentials: {}", missing.join(", "))))
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

/// Settings for the analytics client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Analytics API host, e.g. `https://analyticsapi.zoho.eu`
    pub analytics_server_url: String,
    /// Accounts (OAuth) host, e.g. `https://accounts.zoho.eu`
    pub accounts_server_url: String,
    pub timeout_secs: u64,
    /// Pause between batch-import chunks, in milliseconds
    pub batch_delay_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            analytics_server_url: DEFAULT_ANALYTICS_SERVER_URL.to_string(),
            accounts_server_url: DEFAULT_ACCOUNTS_SERVER_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            batch_delay_ms: DEFAULT_BATCH_DELAY_SECS * 1000,
        }
    }
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }

    /// Point both hosts at one base URL. Used against local mock servers.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base = base_url.into();
        Self { analytics_server_url: base.clone(), accounts_server_url: base, ..Self::default() }
    }
}

/// Settings for the HTTP relay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    pub bind_addr: String,
    pub allowed_origins: Vec<String>,
    /// Organization the relay scopes its upstream calls to
    pub org_id: Option<String>,
    pub rate_limit_max_requests: u64,
    pub rate_limit_window_secs: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            allowed_origins: vec!["http://localhost:3000".to_string()],
            org_id: None,
            rate_limit_max_requests: 100,
            rate_limit_window_secs: 15 * 60,
        }
    }
}

impl RelayConfig {
    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }
}

/// Everything a config file may carry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub credentials: Credentials,
    pub client: ClientConfig,
    pub relay: RelayConfig,
}
