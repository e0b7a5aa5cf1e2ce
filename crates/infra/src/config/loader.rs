//! Configuration loader
//!
//! Loads credentials, client settings and relay settings from environment
//! variables or files.
//!
//! ## Loading Strategy
//! 1. If a config file is given, it is parsed first (JSON or TOML)
//! 2. Environment variables that are set override the file values
//! 3. Credentials are validated last; any empty field is a `Config` error
//!
//! ## Environment Variables
//! - `ZOHO_CLIENT_ID`, `ZOHO_CLIENT_SECRET`, `ZOHO_REFRESH_TOKEN`: OAuth credentials
//! - `ZOHO_ANALYTICS_SERVER_URL`: analytics API host
//! - `ZOHO_ACCOUNTS_SERVER_URL`: accounts (OAuth) host
//! - `ZOHO_TIMEOUT_SECS`: request timeout in seconds
//! - `ZOHO_ORG_ID`: organization the relay scopes its calls to
//! - `RELAY_BIND_ADDR`: relay listen address
//! - `RELAY_ALLOWED_ORIGINS`: comma separated CORS allow-list
//! - `RELAY_RATE_LIMIT_MAX`: requests allowed per window and client
//! - `RELAY_RATE_LIMIT_WINDOW_SECS`: rate limit window length

use std::path::Path;

use zanalytics_domain::{AnalyticsError, ClientConfig, Config, Credentials, RelayConfig, Result};

pub const ENV_CLIENT_ID: &str = "ZOHO_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "ZOHO_CLIENT_SECRET";
pub const ENV_REFRESH_TOKEN: &str = "ZOHO_REFRESH_TOKEN";
pub const ENV_ANALYTICS_SERVER_URL: &str = "ZOHO_ANALYTICS_SERVER_URL";
pub const ENV_ACCOUNTS_SERVER_URL: &str = "ZOHO_ACCOUNTS_SERVER_URL";
pub const ENV_TIMEOUT_SECS: &str = "ZOHO_TIMEOUT_SECS";
pub const ENV_ORG_ID: &str = "ZOHO_ORG_ID";
pub const ENV_BIND_ADDR: &str = "RELAY_BIND_ADDR";
pub const ENV_ALLOWED_ORIGINS: &str = "RELAY_ALLOWED_ORIGINS";
pub const ENV_RATE_LIMIT_MAX: &str = "RELAY_RATE_LIMIT_MAX";
pub const ENV_RATE_LIMIT_WINDOW_SECS: &str = "RELAY_RATE_LIMIT_WINDOW_SECS";

/// Load the full configuration: optional file first, environment on top.
///
/// # Errors
/// Returns `AnalyticsError::Config` if the file cannot be parsed, a numeric
/// variable is invalid, or any credential is missing afterwards.
pub fn load(path: Option<&Path>) -> Result<Config> {
    let base = match path {
        Some(path) => load_from_file(path)?,
        None => Config::default(),
    };

    let config = Config {
        credentials: overlay_credentials(base.credentials),
        client: overlay_client_config(base.client)?,
        relay: overlay_relay_config(base.relay)?,
    };

    config.credentials.validate()?;
    tracing::info!(
        analytics_server_url = %config.client.analytics_server_url,
        from_file = path.is_some(),
        "configuration loaded"
    );
    Ok(config)
}

/// Read the three OAuth credentials from the environment.
///
/// # Errors
/// Returns `AnalyticsError::Config` naming every missing variable.
pub fn load_credentials_from_env() -> Result<Credentials> {
    let credentials = overlay_credentials(Credentials::default());
    credentials.validate().map_err(|_| {
        let missing: Vec<&str> = [ENV_CLIENT_ID, ENV_CLIENT_SECRET, ENV_REFRESH_TOKEN]
            .into_iter()
            .filter(|key| env_string(key).is_none())
            .collect();
        AnalyticsError::Config(format!(
            "Missing required environment variables: {}",
            missing.join(", ")
        ))
    })?;
    Ok(credentials)
}

/// Client settings from the environment, defaults for anything unset.
///
/// # Errors
/// Returns `AnalyticsError::Config` if `ZOHO_TIMEOUT_SECS` is not a number.
pub fn load_client_config_from_env() -> Result<ClientConfig> {
    overlay_client_config(ClientConfig::default())
}

/// Relay settings from the environment, defaults for anything unset.
///
/// # Errors
/// Returns `AnalyticsError::Config` if a numeric variable is invalid.
pub fn load_relay_config_from_env() -> Result<RelayConfig> {
    overlay_relay_config(RelayConfig::default())
}

/// Load configuration from a file
///
/// Format is detected by file extension (`.json` or `.toml`). Missing tables
/// and fields fall back to their defaults.
///
/// # Errors
/// Returns `AnalyticsError::Config` if:
/// - File not found
/// - File format is invalid or unsupported
pub fn load_from_file(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Err(AnalyticsError::Config(format!("Config file not found: {}", path.display())));
    }

    tracing::info!(path = %path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(path)
        .map_err(|e| AnalyticsError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, path)
}

fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| AnalyticsError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| AnalyticsError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(AnalyticsError::Config(format!("Unsupported config format: {extension}"))),
    }
}

fn overlay_credentials(mut credentials: Credentials) -> Credentials {
    if let Some(value) = env_string(ENV_CLIENT_ID) {
        credentials.client_id = value;
    }
    if let Some(value) = env_string(ENV_CLIENT_SECRET) {
        credentials.client_secret = value;
    }
    if let Some(value) = env_string(ENV_REFRESH_TOKEN) {
        credentials.refresh_token = value;
    }
    credentials
}

fn overlay_client_config(mut config: ClientConfig) -> Result<ClientConfig> {
    if let Some(url) = env_string(ENV_ANALYTICS_SERVER_URL) {
        config.analytics_server_url = url;
    }
    if let Some(url) = env_string(ENV_ACCOUNTS_SERVER_URL) {
        config.accounts_server_url = url;
    }
    if let Some(timeout) = env_u64(ENV_TIMEOUT_SECS)? {
        config.timeout_secs = timeout;
    }
    Ok(config)
}

fn overlay_relay_config(mut config: RelayConfig) -> Result<RelayConfig> {
    if let Some(addr) = env_string(ENV_BIND_ADDR) {
        config.bind_addr = addr;
    }
    if let Some(origins) = env_string(ENV_ALLOWED_ORIGINS) {
        config.allowed_origins = parse_list(&origins);
    }
    if let Some(org_id) = env_string(ENV_ORG_ID) {
        config.org_id = Some(org_id);
    }
    if let Some(max) = env_u64(ENV_RATE_LIMIT_MAX)? {
        config.rate_limit_max_requests = max;
    }
    if let Some(window) = env_u64(ENV_RATE_LIMIT_WINDOW_SECS)? {
        config.rate_limit_window_secs = window;
    }
    Ok(config)
}

/// Split a comma separated list, dropping blanks.
fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string).collect()
}

/// Set, non-blank environment variable.
fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn env_u64(key: &str) -> Result<Option<u64>> {
    env_string(key)
        .map(|raw| {
            raw.parse::<u64>()
                .map_err(|e| AnalyticsError::Config(format!("Invalid value for {key}: {e}")))
        })
        .transpose()
}
