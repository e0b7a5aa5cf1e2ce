//! Request pipeline with single refresh-and-retry on token expiry
//!
//! Every upstream call goes through [`ApiClient::execute`]. It attaches the
//! bearer token, sends the request, unwraps the response envelope and, when
//! the upstream reports the token-expired code, refreshes the token and
//! re-issues the identical request exactly once.

use std::path::Path;
use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use reqwest::{Body, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;
use tracing::{debug, info, instrument, warn};
use url::Url;
use zanalytics_domain::constants::{AUTH_SCHEME, CONFIG_PARAM, DATA_FIELD, FILE_FIELD};
use zanalytics_domain::{
    AnalyticsError, ClientConfig, Credentials, ErrorDetail, ErrorEnvelope, Result,
};

use super::auth::{AccessTokenProvider, TokenManager};
use super::request::{ApiRequest, ApiResponse, ExportTarget, Payload};
use crate::errors::InfraError;
use crate::http::HttpClient;

/// Outcome of one attempt, before the retry decision.
enum AttemptError {
    TokenExpired { status: u16, detail: ErrorDetail },
    Failed(AnalyticsError),
}

impl From<AnalyticsError> for AttemptError {
    fn from(err: AnalyticsError) -> Self {
        Self::Failed(err)
    }
}

/// API client implementing the request pipeline
#[derive(Clone)]
pub struct ApiClient {
    http: HttpClient,
    auth: Arc<dyn AccessTokenProvider>,
    config: ClientConfig,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created
    pub fn new(config: ClientConfig, auth: Arc<dyn AccessTokenProvider>) -> Result<Self> {
        let http = HttpClient::builder().timeout(config.timeout()).build()?;
        Ok(Self { http, auth, config })
    }

    /// Create a client that owns a [`TokenManager`] for `credentials`.
    ///
    /// # Errors
    ///
    /// Returns `Config` if any credential is empty
    pub fn from_credentials(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        let http = HttpClient::builder().timeout(config.timeout()).build()?;
        let tokens = TokenManager::new(credentials, &config.accounts_server_url, http.clone())?;
        Ok(Self { http, auth: Arc::new(tokens), config })
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Settings the client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Token source shared by every call.
    pub fn auth(&self) -> &Arc<dyn AccessTokenProvider> {
        &self.auth
    }

    /// Run one logical call.
    ///
    /// # Errors
    ///
    /// - `Io` if a file payload is unreadable (nothing is sent) or an export
    ///   target cannot be written
    /// - `Auth` if the token exchange fails
    /// - `TokenRejected` if the retry after a refresh is rejected again
    /// - `Api` for any other non-2xx response
    /// - `Transport` for connection failures and unparseable bodies
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse> {
        request.payload.ensure_readable().await?;

        let token = self.auth.access_token().await?;
        let detail = match self.attempt(request, &token).await {
            Ok(response) => return Ok(response),
            Err(AttemptError::Failed(err)) => return Err(err),
            Err(AttemptError::TokenExpired { detail, .. }) => detail,
        };

        warn!(code = detail.code, "access token expired, refreshing");
        let token = self.auth.force_refresh().await?;

        match self.attempt(request, &token).await {
            Ok(response) => {
                info!("request succeeded after token refresh");
                Ok(response)
            }
            Err(AttemptError::Failed(err)) => Err(err),
            Err(AttemptError::TokenExpired { status, detail }) => {
                warn!(status, code = detail.code, "access token rejected after refresh");
                Err(detail.into_rejection(status))
            }
        }
    }

    /// Run a call and return only the unwrapped `data`.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::execute`].
    pub async fn execute_data(&self, request: &ApiRequest) -> Result<Value> {
        Ok(self.execute(request).await?.into_data())
    }

    async fn attempt(
        &self,
        request: &ApiRequest,
        token: &str,
    ) -> std::result::Result<ApiResponse, AttemptError> {
        let builder = self.build_request(request, token).await?;
        let response = self.http.send(builder).await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.map_err(transport)?;
            let detail = ErrorEnvelope::detail_from_body(&body);
            if detail.is_token_expired() {
                return Err(AttemptError::TokenExpired { status: status.as_u16(), detail });
            }
            warn!(status = %status, code = detail.code, message = %detail.message, "upstream error");
            return Err(AttemptError::Failed(detail.into_error(status.as_u16())));
        }

        let result = match &request.export {
            Some(ExportTarget::Memory) => {
                let bytes = response.bytes().await.map_err(transport)?;
                Ok(ApiResponse::Bytes(bytes.to_vec()))
            }
            Some(ExportTarget::File(path)) => write_export(response, path).await,
            None => unwrap_envelope(response).await,
        };
        Ok(result?)
    }

    async fn build_request(&self, request: &ApiRequest, token: &str) -> Result<RequestBuilder> {
        let mut url = Url::parse(&format!(
            "{}{}",
            self.config.analytics_server_url.trim_end_matches('/'),
            request.path
        ))
        .map_err(|e| AnalyticsError::Validation(format!("invalid request path: {e}")))?;

        if !request.config.is_empty() {
            url.query_pairs_mut().append_pair(CONFIG_PARAM, &request.config.to_json());
        }

        let mut builder = self
            .http
            .request(request.method.clone(), url)
            .header(reqwest::header::AUTHORIZATION, format!("{AUTH_SCHEME} {token}"));

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let builder = match &request.payload {
            Payload::Empty => builder,
            Payload::Json(body) => builder.json(body),
            Payload::Data(data) => builder.form(&[(DATA_FIELD, data.as_str())]),
            Payload::File(path) => builder.multipart(file_form(path).await?),
            Payload::FileBytes { file_name, bytes } => {
                let part = Part::bytes(bytes.clone()).file_name(file_name.clone());
                builder.multipart(Form::new().part(FILE_FIELD, part))
            }
        };

        Ok(builder)
    }
}

/// Builder for API client
#[derive(Default)]
pub struct ApiClientBuilder {
    config: Option<ClientConfig>,
    auth: Option<Arc<dyn AccessTokenProvider>>,
}

impl ApiClientBuilder {
    /// Set the client configuration
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the authentication provider
    pub fn auth(mut self, auth: Arc<dyn AccessTokenProvider>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Build the API client
    ///
    /// # Errors
    ///
    /// Returns error if required fields are missing or client creation fails
    pub fn build(self) -> Result<ApiClient> {
        let config = self.config.unwrap_or_default();
        let auth =
            self.auth.ok_or_else(|| AnalyticsError::Config("Auth provider not set".to_string()))?;

        ApiClient::new(config, auth)
    }
}

fn transport(err: reqwest::Error) -> AnalyticsError {
    InfraError::from(err).into()
}

async fn file_form(path: &Path) -> Result<Form> {
    let file = tokio::fs::File::open(path).await.map_err(|e| AnalyticsError::io(path, &e))?;
    let length = file.metadata().await.map_err(|e| AnalyticsError::io(path, &e))?.len();
    let file_name = path
        .file_name()
        .map_or_else(|| "data".to_string(), |name| name.to_string_lossy().into_owned());

    let body = Body::wrap_stream(ReaderStream::new(file));
    let part = Part::stream_with_length(body, length).file_name(file_name);
    Ok(Form::new().part(FILE_FIELD, part))
}

async fn unwrap_envelope(response: Response) -> Result<ApiResponse> {
    let status = response.status();
    let bytes = response.bytes().await.map_err(transport)?;

    if status == StatusCode::NO_CONTENT || bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(ApiResponse::Empty);
    }

    let envelope: Value =
        serde_json::from_slice(&bytes).map_err(|e| AnalyticsError::from(InfraError::from(e)))?;

    match envelope {
        Value::Object(mut fields) => {
            let data = fields.remove("data").unwrap_or_else(|| {
                debug!("response envelope has no data member");
                Value::Null
            });
            Ok(ApiResponse::Data(data))
        }
        other => Err(AnalyticsError::Transport(format!(
            "response envelope is not a JSON object: {other}"
        ))),
    }
}

/// Stream the body into a sibling temp file and move it over `path` only once
/// the download completed. A failed export leaves any earlier file untouched.
async fn write_export(mut response: Response, path: &Path) -> Result<ApiResponse> {
    let io_err = |e: std::io::Error| AnalyticsError::io(path, &e);
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let staging = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
    let mut file = tokio::fs::File::from_std(staging.reopen().map_err(io_err)?);

    let mut bytes = 0u64;
    while let Some(chunk) = response.chunk().await.map_err(transport)? {
        file.write_all(&chunk).await.map_err(io_err)?;
        bytes += chunk.len() as u64;
    }
    file.flush().await.map_err(io_err)?;
    drop(file);

    staging.persist(path).map_err(|e| io_err(e.error))?;
    debug!(path = %path.display(), bytes, "export written");
    Ok(ApiResponse::Written { path: path.to_path_buf(), bytes })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use zanalytics_domain::ConfigParams;

    use super::*;

    /// Hands out `initial` until refreshed, then `refreshed`.
    struct CountingProvider {
        initial: String,
        refreshed: String,
        current: parking_lot::Mutex<String>,
        fetches: AtomicUsize,
        refreshes: AtomicUsize,
    }

    impl CountingProvider {
        fn new(initial: &str, refreshed: &str) -> Arc<Self> {
            Arc::new(Self {
                initial: initial.to_string(),
                refreshed: refreshed.to_string(),
                current: parking_lot::Mutex::new(initial.to_string()),
                fetches: AtomicUsize::new(0),
                refreshes: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl AccessTokenProvider for CountingProvider {
        async fn access_token(&self) -> Result<String> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(self.current.lock().clone())
        }

        async fn force_refresh(&self) -> Result<String> {
            self.refreshes.fetch_add(1, Ordering::SeqCst);
            *self.current.lock() = self.refreshed.clone();
            Ok(self.refreshed.clone())
        }
    }

    fn client(server: &MockServer, auth: Arc<CountingProvider>) -> ApiClient {
        ApiClient::new(ClientConfig::with_base_url(server.uri()), auth).unwrap()
    }

    fn expired_body() -> serde_json::Value {
        json!({
            "status": "failure",
            "summary": "INVALID_OAUTHTOKEN",
            "data": { "errorCode": 8535, "errorMessage": "Invalid OAuth access token." }
        })
    }

    #[tokio::test]
    async fn attaches_auth_and_config_and_unwraps_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/restapi/v2/workspaces"))
            .and(header("Authorization", "Zoho-oauthtoken tok1"))
            .and(header("ZANALYTICS-ORGID", "77"))
            .and(query_param("CONFIG", r#"{"keyword":"sales"}"#))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "data": { "ownedWorkspaces": [{"workspaceId": "1"}] }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let auth = CountingProvider::new("tok1", "tok2");
        let client = client(&server, auth.clone());
        let request = ApiRequest::get("/restapi/v2/workspaces")
            .org("77")
            .config(ConfigParams::new().with("keyword", "sales"));

        let data = client.execute_data(&request).await.unwrap();
        assert_eq!(data, json!({ "ownedWorkspaces": [{"workspaceId": "1"}] }));
        assert_eq!(auth.refreshes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_config_adds_no_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/restapi/v2/orgs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"orgs": []}})))
            .mount(&server)
            .await;

        let client = client(&server, CountingProvider::new("tok1", "tok2"));
        client.execute(&ApiRequest::get("/restapi/v2/orgs")).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query(), None);
    }

    #[tokio::test]
    async fn expired_token_is_refreshed_and_request_retried_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/restapi/v2/orgs"))
            .and(header("Authorization", "Zoho-oauthtoken tokOld"))
            .respond_with(ResponseTemplate::new(401).set_body_json(expired_body()))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/restapi/v2/orgs"))
            .and(header("Authorization", "Zoho-oauthtoken tokNew"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"data": {"orgs": [1]}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let auth = CountingProvider::new("tokOld", "tokNew");
        let client = client(&server, auth.clone());

        let data = client.execute_data(&ApiRequest::get("/restapi/v2/orgs")).await.unwrap();
        assert_eq!(data, json!({"orgs": [1]}));
        assert_eq!(auth.refreshes.load(Ordering::SeqCst), 1);
        assert_eq!(auth.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn second_expiry_is_terminal_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/restapi/v2/orgs"))
            .respond_with(ResponseTemplate::new(401).set_body_json(expired_body()))
            .expect(2)
            .mount(&server)
            .await;

        let auth = CountingProvider::new("tokOld", "tokNew");
        let client = client(&server, auth.clone());

        let result = client.execute(&ApiRequest::get("/restapi/v2/orgs")).await;
        assert!(matches!(
            result,
            Err(AnalyticsError::TokenRejected { status: 401, code: 8535, .. })
        ));
        assert_eq!(auth.refreshes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn other_api_errors_fail_immediately() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/restapi/v2/workspaces/9"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "status": "failure",
                "summary": "RESOURCE_NOT_FOUND",
                "data": { "errorCode": 7103, "errorMessage": "Workspace not found" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let auth = CountingProvider::new("tok1", "tok2");
        let client = client(&server, auth.clone());

        let result = client.execute(&ApiRequest::delete("/restapi/v2/workspaces/9")).await;
        match result.unwrap_err() {
            AnalyticsError::Api { status, code, message, body } => {
                assert_eq!((status, code), (400, 7103));
                assert_eq!(message, "Workspace not found");
                assert!(body.contains("RESOURCE_NOT_FOUND"));
            }
            other => panic!("expected api error, got {other:?}"),
        }
        assert_eq!(auth.refreshes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn no_content_resolves_empty() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = client(&server, CountingProvider::new("tok1", "tok2"));
        let response = client.execute(&ApiRequest::put("/restapi/v2/users/active")).await;
        assert_eq!(response.unwrap(), ApiResponse::Empty);
    }

    #[tokio::test]
    async fn malformed_success_body_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server, CountingProvider::new("tok1", "tok2"));
        let result = client.execute(&ApiRequest::get("/restapi/v2/orgs")).await;
        assert!(matches!(result, Err(AnalyticsError::Transport(_))));
    }

    #[tokio::test]
    async fn export_writes_exact_bytes_without_parsing() {
        let server = MockServer::start().await;
        let payload: Vec<u8> = vec![0xD0, 0xCF, 0x11, 0xE0, 0x00, 0xFF, b'{', b'x'];
        Mock::given(method("GET"))
            .and(path("/restapi/v2/workspaces/1/views/2/data"))
            .and(query_param("CONFIG", r#"{"responseFormat":"xls"}"#))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "application/json")
                    .set_body_bytes(payload.clone()),
            )
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("report.xls");
        let client = client(&server, CountingProvider::new("tok1", "tok2"));
        let request = ApiRequest::get("/restapi/v2/workspaces/1/views/2/data")
            .config(ConfigParams::new().with("responseFormat", "xls"))
            .export(ExportTarget::File(target.clone()));

        let response = client.execute(&request).await.unwrap();
        assert_eq!(response, ApiResponse::Written { path: target.clone(), bytes: 8 });
        assert_eq!(std::fs::read(&target).unwrap(), payload);
    }

    #[tokio::test]
    async fn export_to_memory_returns_raw_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("a,b\n1,2\n"))
            .mount(&server)
            .await;

        let client = client(&server, CountingProvider::new("tok1", "tok2"));
        let request = ApiRequest::get("/restapi/v2/workspaces/1/data").export(ExportTarget::Memory);

        let response = client.execute(&request).await.unwrap();
        assert_eq!(response, ApiResponse::Bytes(b"a,b\n1,2\n".to_vec()));
    }

    #[tokio::test]
    async fn failed_export_does_not_create_target() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "data": { "errorCode": 8504, "errorMessage": "Invalid format" }
            })))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.csv");
        let client = client(&server, CountingProvider::new("tok1", "tok2"));
        let request = ApiRequest::get("/restapi/v2/workspaces/1/views/2/data")
            .export(ExportTarget::File(target.clone()));

        let result = client.execute(&request).await;
        assert!(matches!(result, Err(AnalyticsError::Api { code: 8504, .. })));
        assert!(!target.exists());
    }

    /// Yields its bytes, then fails every later read.
    struct BrokenBody(&'static [u8]);

    impl tokio::io::AsyncRead for BrokenBody {
        fn poll_read(
            mut self: std::pin::Pin<&mut Self>,
            _cx: &mut std::task::Context<'_>,
            buf: &mut tokio::io::ReadBuf<'_>,
        ) -> std::task::Poll<std::io::Result<()>> {
            if self.0.is_empty() {
                return std::task::Poll::Ready(Err(std::io::Error::new(
                    std::io::ErrorKind::ConnectionReset,
                    "connection reset",
                )));
            }
            let n = self.0.len().min(buf.remaining());
            buf.put_slice(&self.0[..n]);
            self.0 = &self.0[n..];
            std::task::Poll::Ready(Ok(()))
        }
    }

    #[tokio::test]
    async fn interrupted_export_keeps_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("report.csv");
        std::fs::write(&target, "previous export\n").unwrap();

        let body = Body::wrap_stream(ReaderStream::new(BrokenBody(b"a,b\n1,2\n")));
        let response = Response::from(http::Response::new(body));

        let result = write_export(response, &target).await;
        assert!(matches!(result, Err(AnalyticsError::Transport(_))));
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "previous export\n");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn export_replaces_previous_file_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("a,b\n3,4\n"))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("report.csv");
        std::fs::write(&target, "previous export, longer than the new one\n").unwrap();
        let client = client(&server, CountingProvider::new("tok1", "tok2"));
        let request = ApiRequest::get("/restapi/v2/workspaces/1/views/2/data")
            .export(ExportTarget::File(target.clone()));

        client.execute(&request).await.unwrap();
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "a,b\n3,4\n");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn unreadable_file_fails_before_any_network_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

        let auth = CountingProvider::new("tok1", "tok2");
        let client = client(&server, auth.clone());
        let request = ApiRequest::post("/restapi/v2/workspaces/1/data").file("/no/such/file.csv");

        let result = client.execute(&request).await;
        assert!(matches!(result, Err(AnalyticsError::Io { .. })));
        assert_eq!(auth.fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn file_payload_is_sent_as_multipart_file_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/restapi/v2/workspaces/1/data"))
            .and(body_string_contains(r#"name="FILE"; filename="sales.csv""#))
            .and(body_string_contains("Region,Amount"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "viewId": "55", "importSummary": { "successRowCount": 1 } }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("sales.csv");
        std::fs::write(&file, "Region,Amount\nEast,10\n").unwrap();

        let client = client(&server, CountingProvider::new("tok1", "tok2"));
        let request = ApiRequest::post("/restapi/v2/workspaces/1/data").file(&file);

        let data = client.execute_data(&request).await.unwrap();
        assert_eq!(data["viewId"], "55");
    }

    #[tokio::test]
    async fn file_payload_is_resent_after_refresh() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("Authorization", "Zoho-oauthtoken tokOld"))
            .respond_with(ResponseTemplate::new(401).set_body_json(expired_body()))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(header("Authorization", "Zoho-oauthtoken tokNew"))
            .and(body_string_contains("East,10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"ok": true}})))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("sales.csv");
        std::fs::write(&file, "Region,Amount\nEast,10\n").unwrap();

        let client = client(&server, CountingProvider::new("tokOld", "tokNew"));
        let data = client
            .execute_data(&ApiRequest::post("/restapi/v2/workspaces/1/data").file(&file))
            .await
            .unwrap();
        assert_eq!(data, json!({"ok": true}));
    }

    #[tokio::test]
    async fn data_payload_is_sent_as_form_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("DATA=Region%2CAmount"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server, CountingProvider::new("tok1", "tok2"));
        let request =
            ApiRequest::post("/restapi/v2/workspaces/1/views/2/data").data("Region,Amount\nEast,1");

        client.execute(&request).await.unwrap();
    }

    #[tokio::test]
    async fn builder_requires_auth() {
        assert!(ApiClient::builder().build().is_err());
        let auth = CountingProvider::new("a", "b");
        assert!(ApiClient::builder().auth(auth).build().is_ok());
    }
}
