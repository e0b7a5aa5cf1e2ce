//! Organization-level operations

use serde_json::Value;
use zanalytics_domain::{ConfigParams, Result};

use super::client::ApiClient;
use super::endpoints::tables::org as endpoints;
use super::endpoints::Scope;

/// Operations scoped to one organization.
#[derive(Clone)]
pub struct OrgApi {
    api: ApiClient,
    scope: Scope,
}

impl OrgApi {
    pub(crate) fn new(api: ApiClient, scope: Scope) -> Self {
        Self { api, scope }
    }

    /// Create a workspace and return its id.
    pub async fn create_workspace(&self, workspace_name: &str, config: ConfigParams) -> Result<String> {
        let config = config.with("workspaceName", workspace_name);
        self.api.call_id(&endpoints::CREATE_WORKSPACE, &self.scope, &[], config).await
    }

    pub async fn get_admins(&self) -> Result<Vec<Value>> {
        self.api.call_list(&endpoints::ADMINS, &self.scope, &[], ConfigParams::new()).await
    }

    pub async fn get_users(&self) -> Result<Vec<Value>> {
        self.api.call_list(&endpoints::USERS, &self.scope, &[], ConfigParams::new()).await
    }

    pub async fn add_users(&self, email_ids: &[&str], config: ConfigParams) -> Result<()> {
        let config = config.with("emailIds", email_ids);
        self.api.call_unit(&endpoints::ADD_USERS, &self.scope, &[], config).await
    }

    pub async fn remove_users(&self, email_ids: &[&str], config: ConfigParams) -> Result<()> {
        let config = config.with("emailIds", email_ids);
        self.api.call_unit(&endpoints::REMOVE_USERS, &self.scope, &[], config).await
    }

    pub async fn activate_users(&self, email_ids: &[&str], config: ConfigParams) -> Result<()> {
        let config = config.with("emailIds", email_ids);
        self.api.call_unit(&endpoints::ACTIVATE_USERS, &self.scope, &[], config).await
    }

    pub async fn deactivate_users(&self, email_ids: &[&str], config: ConfigParams) -> Result<()> {
        let config = config.with("emailIds", email_ids);
        self.api.call_unit(&endpoints::DEACTIVATE_USERS, &self.scope, &[], config).await
    }

    pub async fn change_user_role(
        &self,
        email_ids: &[&str],
        role: &str,
        config: ConfigParams,
    ) -> Result<()> {
        let config = config.with("emailIds", email_ids).with("role", role);
        self.api.call_unit(&endpoints::CHANGE_USER_ROLE, &self.scope, &[], config).await
    }

    pub async fn get_subscription_details(&self) -> Result<Value> {
        self.api.call(&endpoints::SUBSCRIPTION, &self.scope, &[], ConfigParams::new()).await
    }

    pub async fn get_resource_details(&self) -> Result<Value> {
        self.api.call(&endpoints::RESOURCES, &self.scope, &[], ConfigParams::new()).await
    }

    /// Look up workspace (and optionally view) metadata by name.
    pub async fn get_meta_details(
        &self,
        workspace_name: &str,
        view_name: Option<&str>,
    ) -> Result<Value> {
        let mut config = ConfigParams::new().with("workspaceName", workspace_name);
        if let Some(view_name) = view_name {
            config.insert("viewName", view_name);
        }
        self.api.call(&endpoints::META_DETAILS, &self.scope, &[], config).await
    }
}
