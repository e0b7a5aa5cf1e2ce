//! Shared helpers for the infra integration tests.

use std::sync::Arc;

use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zanalytics_domain::{ClientConfig, Credentials};
use zanalytics_infra::{AnalyticsClient, ApiClient, HttpClient, TokenManager};

pub fn credentials() -> Credentials {
    Credentials::new("1000.client", "client-secret", "1000.refresh")
}

/// Both hosts on the mock server, no pause between batches.
pub fn client_config(server: &MockServer) -> ClientConfig {
    ClientConfig { batch_delay_ms: 0, ..ClientConfig::with_base_url(server.uri()) }
}

/// A real token manager against the mock accounts host, kept inspectable.
pub fn token_manager(server: &MockServer) -> Arc<TokenManager> {
    let http = HttpClient::new().unwrap();
    Arc::new(TokenManager::new(credentials(), &server.uri(), http).unwrap())
}

pub fn analytics_client(server: &MockServer, tokens: Arc<TokenManager>) -> AnalyticsClient {
    AnalyticsClient::from_api(ApiClient::new(client_config(server), tokens).unwrap())
}

/// Token endpoint answering every exchange with `token`.
pub async fn mount_token(server: &MockServer, token: &str, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/oauth/v2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": token,
            "api_domain": "https://www.zohoapis.com",
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

pub fn success(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "status": "success", "summary": "ok", "data": data }))
}

pub fn token_expired() -> ResponseTemplate {
    ResponseTemplate::new(401).set_body_json(json!({
        "status": "failure",
        "summary": "INVALID_OAUTHTOKEN",
        "data": { "errorCode": 8535, "errorMessage": "Invalid OAuth access token." }
    }))
}
