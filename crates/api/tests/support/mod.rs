//! Shared helpers for the relay integration tests.

use std::net::SocketAddr;

use axum::body::{to_bytes, Body};
use axum::extract::ConnectInfo;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zanalytics_domain::{ClientConfig, Credentials, RelayConfig};
use zanalytics_infra::AnalyticsClient;
use zanalytics_relay::{router, AppState};

pub fn relay_config() -> RelayConfig {
    RelayConfig {
        allowed_origins: vec!["http://localhost:3000".to_string()],
        ..RelayConfig::default()
    }
}

/// Relay whose analytics client talks to the mock server for both hosts.
pub fn relay(server: &MockServer, config: RelayConfig) -> Router {
    let credentials = Credentials::new("1000.client", "client-secret", "1000.refresh");
    let client = AnalyticsClient::new(credentials, ClientConfig::with_base_url(server.uri())).unwrap();
    router(AppState::new(client, config).unwrap())
}

pub async fn mount_token(server: &MockServer, token: &str, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/oauth/v2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": token })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

pub fn success(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "status": "success", "data": data }))
}

/// Request as if it arrived from `peer`.
pub fn from_peer(mut request: Request<Body>, peer: [u8; 4]) -> Request<Body> {
    request.extensions_mut().insert(ConnectInfo(SocketAddr::from((peer, 40000))));
    request
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

/// Send one request and decode the JSON body.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, body)
}
