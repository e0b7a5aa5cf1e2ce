//! Shared fixtures for the façade unit tests.

use std::sync::Arc;

use async_trait::async_trait;
use wiremock::MockServer;
use zanalytics_domain::{ClientConfig, Result};

use super::auth::AccessTokenProvider;
use super::client::ApiClient;

/// Provider that always hands out `tok`.
pub struct StaticToken;

#[async_trait]
impl AccessTokenProvider for StaticToken {
    async fn access_token(&self) -> Result<String> {
        Ok("tok".to_string())
    }

    async fn force_refresh(&self) -> Result<String> {
        Ok("tok".to_string())
    }
}

/// Pipeline pointed at `server` with no batch delay.
pub fn api_for(server: &MockServer) -> ApiClient {
    let config = ClientConfig { batch_delay_ms: 0, ..ClientConfig::with_base_url(server.uri()) };
    ApiClient::new(config, Arc::new(StaticToken)).unwrap()
}
