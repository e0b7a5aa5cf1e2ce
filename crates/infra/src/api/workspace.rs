//! Workspace-level operations

use serde_json::Value;
use zanalytics_domain::constants::DEST_ORG_ID_HEADER;
use zanalytics_domain::{ConfigParams, Result};

use super::client::ApiClient;
use super::endpoints::tables::workspace as endpoints;
use super::endpoints::{expect_id, Endpoint, Scope};

/// Operations on one workspace.
#[derive(Clone)]
pub struct WorkspaceApi {
    api: ApiClient,
    scope: Scope,
    workspace_id: String,
}

impl WorkspaceApi {
    pub(crate) fn new(api: ApiClient, scope: Scope, workspace_id: String) -> Self {
        Self { api, scope, workspace_id }
    }

    pub fn workspace_id(&self) -> &str {
        &self.workspace_id
    }

    async fn call(&self, endpoint: &Endpoint, extra: &[(&str, &str)], config: ConfigParams) -> Result<Value> {
        let mut args = vec![("workspace", self.workspace_id.as_str())];
        args.extend_from_slice(extra);
        self.api.call(endpoint, &self.scope, &args, config).await
    }

    async fn call_id(&self, endpoint: &Endpoint, extra: &[(&str, &str)], config: ConfigParams) -> Result<String> {
        let mut args = vec![("workspace", self.workspace_id.as_str())];
        args.extend_from_slice(extra);
        self.api.call_id(endpoint, &self.scope, &args, config).await
    }

    async fn call_list(&self, endpoint: &Endpoint, config: ConfigParams) -> Result<Vec<Value>> {
        self.api.call_list(endpoint, &self.scope, &[("workspace", self.workspace_id.as_str())], config).await
    }

    async fn call_unit(&self, endpoint: &Endpoint, extra: &[(&str, &str)], config: ConfigParams) -> Result<()> {
        self.call(endpoint, extra, config).await.map(|_| ())
    }

    /// Copy the workspace, optionally into another organization.
    pub async fn copy(
        &self,
        new_workspace_name: &str,
        dest_org_id: Option<&str>,
        config: ConfigParams,
    ) -> Result<String> {
        let config = config.with("newWorkspaceName", new_workspace_name);
        let mut request = self.scope.apply(
            endpoints::COPY.request(&[("workspace", self.workspace_id.as_str())], config)?,
        );
        if let Some(dest_org_id) = dest_org_id {
            request = request.header(DEST_ORG_ID_HEADER, dest_org_id);
        }

        let response = self.api.execute(&request).await?;
        expect_id(&endpoints::COPY, endpoints::COPY.projection.apply(response))
    }

    pub async fn rename(&self, workspace_name: &str, config: ConfigParams) -> Result<()> {
        let config = config.with("workspaceName", workspace_name);
        self.call_unit(&endpoints::RENAME, &[], config).await
    }

    pub async fn delete(&self) -> Result<()> {
        self.call_unit(&endpoints::DELETE, &[], ConfigParams::new()).await
    }

    pub async fn get_secret_key(&self, config: ConfigParams) -> Result<String> {
        self.call_id(&endpoints::SECRET_KEY, &[], config).await
    }

    pub async fn add_favorite(&self) -> Result<()> {
        self.call_unit(&endpoints::ADD_FAVORITE, &[], ConfigParams::new()).await
    }

    pub async fn remove_favorite(&self) -> Result<()> {
        self.call_unit(&endpoints::REMOVE_FAVORITE, &[], ConfigParams::new()).await
    }

    pub async fn add_default(&self) -> Result<()> {
        self.call_unit(&endpoints::ADD_DEFAULT, &[], ConfigParams::new()).await
    }

    pub async fn remove_default(&self) -> Result<()> {
        self.call_unit(&endpoints::REMOVE_DEFAULT, &[], ConfigParams::new()).await
    }

    pub async fn get_admins(&self) -> Result<Vec<Value>> {
        self.call_list(&endpoints::ADMINS, ConfigParams::new()).await
    }

    pub async fn add_admins(&self, email_ids: &[&str], config: ConfigParams) -> Result<()> {
        self.call_unit(&endpoints::ADD_ADMINS, &[], config.with("emailIds", email_ids)).await
    }

    pub async fn remove_admins(&self, email_ids: &[&str], config: ConfigParams) -> Result<()> {
        self.call_unit(&endpoints::REMOVE_ADMINS, &[], config.with("emailIds", email_ids)).await
    }

    pub async fn get_share_info(&self) -> Result<Value> {
        self.call(&endpoints::SHARE_INFO, &[], ConfigParams::new()).await
    }

    pub async fn share_views(
        &self,
        view_ids: &[&str],
        email_ids: &[&str],
        permissions: Value,
        config: ConfigParams,
    ) -> Result<()> {
        let config = config
            .with("viewIds", view_ids)
            .with("emailIds", email_ids)
            .with("permissions", permissions);
        self.call_unit(&endpoints::SHARE_VIEWS, &[], config).await
    }

    pub async fn remove_share(&self, email_ids: &[&str], config: ConfigParams) -> Result<()> {
        self.call_unit(&endpoints::REMOVE_SHARE, &[], config.with("emailIds", email_ids)).await
    }

    pub async fn get_shared_details_for_views(&self, view_ids: &[&str]) -> Result<Vec<Value>> {
        self.call_list(&endpoints::SHARED_DETAILS, ConfigParams::new().with("viewIds", view_ids))
            .await
    }

    pub async fn get_my_permissions(&self) -> Result<Value> {
        self.call(&endpoints::MY_PERMISSIONS, &[], ConfigParams::new()).await
    }

    pub async fn get_views(&self, config: ConfigParams) -> Result<Vec<Value>> {
        self.call_list(&endpoints::VIEWS, config).await
    }

    /// Create a table from a design object and return the new view id.
    pub async fn create_table(&self, table_design: Value) -> Result<String> {
        let config = ConfigParams::new().with("tableDesign", table_design);
        self.call_id(&endpoints::CREATE_TABLE, &[], config).await
    }

    pub async fn create_query_table(
        &self,
        sql_query: &str,
        query_table_name: &str,
        config: ConfigParams,
    ) -> Result<String> {
        let config = config.with("sqlQuery", sql_query).with("queryTableName", query_table_name);
        self.call_id(&endpoints::CREATE_QUERY_TABLE, &[], config).await
    }

    pub async fn edit_query_table(&self, view_id: &str, sql_query: &str, config: ConfigParams) -> Result<()> {
        let config = config.with("sqlQuery", sql_query);
        self.call_unit(&endpoints::EDIT_QUERY_TABLE, &[("view", view_id)], config).await
    }

    pub async fn get_folders(&self) -> Result<Vec<Value>> {
        self.call_list(&endpoints::FOLDERS, ConfigParams::new()).await
    }

    pub async fn create_folder(&self, folder_name: &str, config: ConfigParams) -> Result<String> {
        self.call_id(&endpoints::CREATE_FOLDER, &[], config.with("folderName", folder_name)).await
    }

    pub async fn rename_folder(&self, folder_id: &str, folder_name: &str, config: ConfigParams) -> Result<()> {
        let config = config.with("folderName", folder_name);
        self.call_unit(&endpoints::RENAME_FOLDER, &[("folder", folder_id)], config).await
    }

    pub async fn delete_folder(&self, folder_id: &str) -> Result<()> {
        self.call_unit(&endpoints::DELETE_FOLDER, &[("folder", folder_id)], ConfigParams::new()).await
    }

    pub async fn get_groups(&self) -> Result<Vec<Value>> {
        self.call_list(&endpoints::GROUPS, ConfigParams::new()).await
    }

    pub async fn create_group(
        &self,
        group_name: &str,
        email_ids: &[&str],
        config: ConfigParams,
    ) -> Result<String> {
        let config = config.with("groupName", group_name).with("emailIds", email_ids);
        self.call_id(&endpoints::CREATE_GROUP, &[], config).await
    }

    pub async fn delete_group(&self, group_id: &str) -> Result<()> {
        self.call_unit(&endpoints::DELETE_GROUP, &[("group", group_id)], ConfigParams::new()).await
    }

    pub async fn get_slideshows(&self) -> Result<Vec<Value>> {
        self.call_list(&endpoints::SLIDESHOWS, ConfigParams::new()).await
    }

    pub async fn get_variables(&self) -> Result<Vec<Value>> {
        self.call_list(&endpoints::VARIABLES, ConfigParams::new()).await
    }

    pub async fn get_datasources(&self) -> Result<Vec<Value>> {
        self.call_list(&endpoints::DATASOURCES, ConfigParams::new()).await
    }

    /// Trigger a sync of one data source.
    pub async fn sync_data(&self, datasource_id: &str, config: ConfigParams) -> Result<()> {
        self.call_unit(&endpoints::SYNC_DATA, &[("datasource", datasource_id)], config).await
    }

    pub async fn get_trash_views(&self) -> Result<Vec<Value>> {
        self.call_list(&endpoints::TRASH_VIEWS, ConfigParams::new()).await
    }

    pub async fn restore_trash_view(&self, view_id: &str, config: ConfigParams) -> Result<()> {
        self.call_unit(&endpoints::RESTORE_TRASH_VIEW, &[("view", view_id)], config).await
    }

    pub async fn delete_trash_view(&self, view_id: &str) -> Result<()> {
        self.call_unit(&endpoints::DELETE_TRASH_VIEW, &[("view", view_id)], ConfigParams::new()).await
    }
}
