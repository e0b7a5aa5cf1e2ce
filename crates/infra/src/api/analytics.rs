//! Entry point of the client library
//!
//! [`AnalyticsClient`] owns the pipeline and hands out the scoped façades.

use std::sync::Arc;

use serde_json::Value;
use zanalytics_domain::{ClientConfig, ConfigParams, Credentials, Result};

use super::auth::AccessTokenProvider;
use super::bulk::BulkApi;
use super::client::ApiClient;
use super::endpoints::tables::client as endpoints;
use super::endpoints::Scope;
use super::org::OrgApi;
use super::view::ViewApi;
use super::workspace::WorkspaceApi;

/// Analytics API client.
///
/// Cheap to clone; clones share the token cache.
#[derive(Clone)]
pub struct AnalyticsClient {
    api: ApiClient,
}

impl AnalyticsClient {
    /// Create a client that exchanges `credentials` for access tokens.
    ///
    /// # Errors
    ///
    /// Returns `Config` if any credential is empty.
    pub fn new(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        Ok(Self { api: ApiClient::from_credentials(credentials, config)? })
    }

    /// Create a client around an existing token provider.
    pub fn with_provider(config: ClientConfig, auth: Arc<dyn AccessTokenProvider>) -> Result<Self> {
        Ok(Self { api: ApiClient::new(config, auth)? })
    }

    pub fn from_api(api: ApiClient) -> Self {
        Self { api }
    }

    /// The underlying request pipeline.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn org(&self, org_id: impl Into<String>) -> OrgApi {
        OrgApi::new(self.api.clone(), Scope::org(org_id))
    }

    pub fn workspace(&self, org_id: impl Into<String>, workspace_id: impl Into<String>) -> WorkspaceApi {
        WorkspaceApi::new(self.api.clone(), Scope::org(org_id), workspace_id.into())
    }

    pub fn view(
        &self,
        org_id: impl Into<String>,
        workspace_id: impl Into<String>,
        view_id: impl Into<String>,
    ) -> ViewApi {
        ViewApi::new(self.api.clone(), Scope::org(org_id), workspace_id.into(), view_id.into())
    }

    pub fn bulk(&self, org_id: impl Into<String>, workspace_id: impl Into<String>) -> BulkApi {
        BulkApi::new(self.api.clone(), Scope::org(org_id), workspace_id.into())
    }

    /// View handle without the organization header.
    ///
    /// The upstream resolves the organization from the workspace in that case.
    pub fn unscoped_view(&self, workspace_id: impl Into<String>, view_id: impl Into<String>) -> ViewApi {
        ViewApi::new(self.api.clone(), Scope::none(), workspace_id.into(), view_id.into())
    }

    /// Organizations the user belongs to.
    pub async fn get_orgs(&self) -> Result<Vec<Value>> {
        self.api.call_list(&endpoints::ORGS, &Scope::none(), &[], ConfigParams::new()).await
    }

    /// Owned and shared workspaces together.
    pub async fn get_workspaces(&self) -> Result<Value> {
        self.api.call(&endpoints::WORKSPACES, &Scope::none(), &[], ConfigParams::new()).await
    }

    pub async fn get_owned_workspaces(&self) -> Result<Vec<Value>> {
        self.api
            .call_list(&endpoints::OWNED_WORKSPACES, &Scope::none(), &[], ConfigParams::new())
            .await
    }

    pub async fn get_shared_workspaces(&self) -> Result<Vec<Value>> {
        self.api
            .call_list(&endpoints::SHARED_WORKSPACES, &Scope::none(), &[], ConfigParams::new())
            .await
    }

    pub async fn get_recent_views(&self) -> Result<Vec<Value>> {
        self.api.call_list(&endpoints::RECENT_VIEWS, &Scope::none(), &[], ConfigParams::new()).await
    }

    /// Owned and shared dashboards together.
    pub async fn get_dashboards(&self) -> Result<Value> {
        self.api.call(&endpoints::DASHBOARDS, &Scope::none(), &[], ConfigParams::new()).await
    }

    pub async fn get_owned_dashboards(&self) -> Result<Vec<Value>> {
        self.api
            .call_list(&endpoints::OWNED_DASHBOARDS, &Scope::none(), &[], ConfigParams::new())
            .await
    }

    pub async fn get_shared_dashboards(&self) -> Result<Vec<Value>> {
        self.api
            .call_list(&endpoints::SHARED_DASHBOARDS, &Scope::none(), &[], ConfigParams::new())
            .await
    }

    pub async fn get_workspace_details(&self, workspace_id: &str) -> Result<Value> {
        self.api
            .call(
                &endpoints::WORKSPACE_DETAILS,
                &Scope::none(),
                &[("workspace", workspace_id)],
                ConfigParams::new(),
            )
            .await
    }

    /// Details of any view, dashboards included, by id alone.
    pub async fn get_view_details(&self, view_id: &str, config: ConfigParams) -> Result<Value> {
        self.api
            .call(&endpoints::VIEW_DETAILS, &Scope::none(), &[("view", view_id)], config)
            .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use zanalytics_domain::AnalyticsError;

    use super::*;
    use crate::api::testing::StaticToken;

    fn client(server: &MockServer) -> AnalyticsClient {
        AnalyticsClient::with_provider(ClientConfig::with_base_url(server.uri()), Arc::new(StaticToken))
            .unwrap()
    }

    #[tokio::test]
    async fn get_orgs_projects_org_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/restapi/v2/orgs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "data": { "orgs": [{"orgId": "1"}, {"orgId": "2"}] }
            })))
            .mount(&server)
            .await;

        let orgs = client(&server).get_orgs().await.unwrap();
        assert_eq!(orgs, vec![json!({"orgId": "1"}), json!({"orgId": "2"})]);
    }

    #[tokio::test]
    async fn view_details_carry_no_org_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/restapi/v2/views/99"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "views": {"viewId": "99", "viewType": "Dashboard"} }
            })))
            .mount(&server)
            .await;

        let details = client(&server).get_view_details("99", ConfigParams::new()).await.unwrap();
        assert_eq!(details["viewType"], "Dashboard");

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("ZANALYTICS-ORGID").is_none());
    }

    #[tokio::test]
    async fn blank_id_fails_without_network() {
        let server = MockServer::start().await;
        let result = client(&server).get_workspace_details("").await;

        assert!(matches!(result, Err(AnalyticsError::Validation(_))));
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
