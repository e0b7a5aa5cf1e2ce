//! Application state.

use std::net::IpAddr;
use std::sync::Arc;

use zanalytics_common::{FixedWindowConfig, FixedWindowLimiter};
use zanalytics_domain::{AnalyticsError, RelayConfig, Result};
use zanalytics_infra::{AnalyticsClient, ViewApi};

/// Rate limit bucket: the peer address, or `None` when the server was not
/// started with connection info. All such requests share one bucket.
pub type ClientKey = Option<IpAddr>;

/// Shared application state available to all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Analytics client; clones share the cached access token.
    pub client: AnalyticsClient,

    /// Relay configuration.
    pub config: Arc<RelayConfig>,

    pub limiter: FixedWindowLimiter<ClientKey>,
}

impl AppState {
    /// Build the state from an analytics client and relay settings.
    ///
    /// # Errors
    ///
    /// `Config` if the rate limit settings are zero.
    pub fn new(client: AnalyticsClient, config: RelayConfig) -> Result<Self> {
        let limits = FixedWindowConfig::builder()
            .max_requests(config.rate_limit_max_requests)
            .window(config.rate_limit_window())
            .build()
            .map_err(|e| AnalyticsError::Config(format!("invalid rate limit: {e}")))?;
        let limiter = FixedWindowLimiter::new(limits).map_err(AnalyticsError::Config)?;

        tracing::info!(
            allowed_origins = ?config.allowed_origins,
            org_id = ?config.org_id,
            max_requests = config.rate_limit_max_requests,
            window_secs = config.rate_limit_window_secs,
            "relay state ready"
        );

        Ok(Self { client, config: Arc::new(config), limiter })
    }

    /// View handle for a report request.
    ///
    /// Scoped to the configured organization when there is one, otherwise the
    /// upstream resolves it from the workspace.
    pub fn report_view(&self, workspace_id: &str, view_id: &str) -> ViewApi {
        match self.config.org_id.as_deref() {
            Some(org_id) => self.client.view(org_id, workspace_id, view_id),
            None => self.client.unscoped_view(workspace_id, view_id),
        }
    }
}
