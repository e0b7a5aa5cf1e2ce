//! OAuth refresh-token exchange and access-token caching
//!
//! The access token is fetched lazily on first use and replaced wholesale
//! whenever the pipeline reports it expired. There is no expiry timer: the
//! upstream never tells us the lifetime we could trust, so staleness is only
//! discovered reactively.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};
use zanalytics_domain::constants::TOKEN_PATH;
use zanalytics_domain::{AnalyticsError, Credentials, Result};

use crate::errors::InfraError;
use crate::http::HttpClient;

/// Trait for providing access tokens
///
/// This trait allows dependency injection and testing with mock providers.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Return the cached token, fetching one first if none is cached.
    async fn access_token(&self) -> Result<String>;

    /// Unconditionally exchange the refresh token again and replace the cache.
    async fn force_refresh(&self) -> Result<String>;
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Owns the credentials and the current access token.
///
/// Concurrent callers may race to refresh; each exchange simply overwrites the
/// cached value.
pub struct TokenManager {
    http: HttpClient,
    token_url: String,
    credentials: Credentials,
    current: RwLock<Option<String>>,
    exchanges: AtomicUsize,
}

impl TokenManager {
    /// Create a token manager for the given accounts host.
    ///
    /// # Errors
    ///
    /// Returns `Config` if any credential is empty.
    pub fn new(
        credentials: Credentials,
        accounts_server_url: &str,
        http: HttpClient,
    ) -> Result<Self> {
        credentials.validate()?;

        Ok(Self {
            http,
            token_url: format!("{}{}", accounts_server_url.trim_end_matches('/'), TOKEN_PATH),
            credentials,
            current: RwLock::new(None),
            exchanges: AtomicUsize::new(0),
        })
    }

    /// Seed the cache with a token obtained elsewhere.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.current = RwLock::new(Some(token.into()));
        self
    }

    /// Currently cached token, if any. Never triggers an exchange.
    pub async fn cached_token(&self) -> Option<String> {
        self.current.read().await.clone()
    }

    /// Number of refresh-token exchanges performed so far.
    pub fn exchange_count(&self) -> usize {
        self.exchanges.load(Ordering::SeqCst)
    }

    #[instrument(skip(self), fields(token_url = %self.token_url))]
    async fn exchange(&self) -> Result<String> {
        self.exchanges.fetch_add(1, Ordering::SeqCst);
        debug!("exchanging refresh token");

        let form = [
            ("grant_type", "refresh_token"),
            ("refresh_token", self.credentials.refresh_token.as_str()),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
        ];

        let response =
            self.http.send(self.http.request(reqwest::Method::POST, &self.token_url).form(&form)).await?;
        let status = response.status();
        let body = response.text().await.map_err(|e| AnalyticsError::from(InfraError::from(e)))?;

        let parsed: TokenResponse =
            serde_json::from_str(&body).map_err(|e| AnalyticsError::from(InfraError::from(e)))?;

        match parsed.access_token.filter(|t| !t.is_empty()) {
            Some(token) => {
                *self.current.write().await = Some(token.clone());
                info!("access token refreshed");
                Ok(token)
            }
            None => {
                let reason = parsed.error.unwrap_or_else(|| body.trim().to_string());
                warn!(status = %status, error = %reason, "refresh token exchange rejected");
                Err(AnalyticsError::Auth(format!("token exchange failed: {reason}")))
            }
        }
    }
}

#[async_trait]
impl AccessTokenProvider for TokenManager {
    async fn access_token(&self) -> Result<String> {
        if let Some(token) = self.current.read().await.as_ref() {
            return Ok(token.clone());
        }
        self.exchange().await
    }

    async fn force_refresh(&self) -> Result<String> {
        self.exchange().await
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn credentials() -> Credentials {
        Credentials::new("client-1", "secret-1", "refresh-1")
    }

    fn manager(server: &MockServer) -> TokenManager {
        TokenManager::new(credentials(), &server.uri(), HttpClient::new().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn fetches_lazily_and_caches() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/v2/token"))
            .and(body_string_contains("grant_type=refresh_token"))
            .and(body_string_contains("refresh_token=refresh-1"))
            .and(body_string_contains("client_id=client-1"))
            .and(body_string_contains("client_secret=secret-1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "access_token": "tok1",
                    "expires_in": 3600
                })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let tokens = manager(&server);
        assert_eq!(tokens.cached_token().await, None);

        assert_eq!(tokens.access_token().await.unwrap(), "tok1");
        assert_eq!(tokens.access_token().await.unwrap(), "tok1");
        assert_eq!(tokens.exchange_count(), 1);
    }

    #[tokio::test]
    async fn force_refresh_overwrites_cached_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/v2/token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "access_token": "tokNew" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let tokens = manager(&server).with_token("tokOld");
        assert_eq!(tokens.access_token().await.unwrap(), "tokOld");

        assert_eq!(tokens.force_refresh().await.unwrap(), "tokNew");
        assert_eq!(tokens.cached_token().await.as_deref(), Some("tokNew"));
    }

    #[tokio::test]
    async fn missing_access_token_is_auth_error_with_upstream_reason() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/v2/token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "error": "invalid_code" })),
            )
            .mount(&server)
            .await;

        let tokens = manager(&server);
        match tokens.access_token().await {
            Err(AnalyticsError::Auth(msg)) => assert!(msg.contains("invalid_code")),
            other => panic!("expected auth error, got {:?}", other),
        }
        assert_eq!(tokens.cached_token().await, None);
    }

    #[tokio::test]
    async fn non_json_token_response_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/v2/token"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
            .mount(&server)
            .await;

        let result = manager(&server).access_token().await;
        assert!(matches!(result, Err(AnalyticsError::Transport(_))));
    }

    #[test]
    fn incomplete_credentials_are_rejected() {
        let result = TokenManager::new(
            Credentials::new("id", "", "refresh"),
            "https://accounts.example.com",
            HttpClient::new().unwrap(),
        );
        assert!(matches!(result, Err(AnalyticsError::Config(_))));
    }
}
