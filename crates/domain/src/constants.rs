//! Wire constants
//!
//! Fixed values dictated by the upstream analytics API. Changing any of these
//! breaks compatibility with the service.

// Hosts
pub const DEFAULT_ANALYTICS_SERVER_URL: &str = "https://analyticsapi.zoho.com";
pub const DEFAULT_ACCOUNTS_SERVER_URL: &str = "https://accounts.zoho.com";

// Paths
pub const TOKEN_PATH: &str = "/oauth/v2/token";
pub const API_PREFIX: &str = "/restapi/v2";
pub const BULK_PREFIX: &str = "/restapi/v2/bulk";

// Request conventions
pub const CONFIG_PARAM: &str = "CONFIG";
pub const DATA_FIELD: &str = "DATA";
pub const FILE_FIELD: &str = "FILE";
pub const AUTH_SCHEME: &str = "Zoho-oauthtoken";
pub const ORG_ID_HEADER: &str = "ZANALYTICS-ORGID";
pub const DEST_ORG_ID_HEADER: &str = "ZANALYTICS-DEST-ORGID";
pub const CLIENT_NAME: &str = "Analytics Rust Client";

/// Application error code meaning "access token no longer valid".
pub const TOKEN_EXPIRED_CODE: i64 = 8535;

// Batch import
pub const BATCH_START_KEY: &str = "start";
pub const DEFAULT_BATCH_DELAY_SECS: u64 = 2;

// Transport
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// `User-Agent` value sent with every API request.
pub fn user_agent() -> String {
    format!("{CLIENT_NAME} v{}", env!("CARGO_PKG_VERSION"))
}
