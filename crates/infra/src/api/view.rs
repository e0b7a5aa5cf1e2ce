//! View-level operations: tables, reports, dashboards and their columns, rows
//! and publishing links.

use serde_json::Value;
use zanalytics_domain::{ConfigParams, Result};

use super::client::ApiClient;
use super::endpoints::tables::view as endpoints;
use super::endpoints::{expect_id, Endpoint, Scope};

/// Operations on one view of a workspace.
#[derive(Clone)]
pub struct ViewApi {
    api: ApiClient,
    scope: Scope,
    workspace_id: String,
    view_id: String,
}

impl ViewApi {
    pub(crate) fn new(api: ApiClient, scope: Scope, workspace_id: String, view_id: String) -> Self {
        Self { api, scope, workspace_id, view_id }
    }

    pub fn view_id(&self) -> &str {
        &self.view_id
    }

    async fn call_with(
        &self,
        endpoint: &Endpoint,
        extra: Option<(&str, &str)>,
        config: ConfigParams,
    ) -> Result<Value> {
        let mut args = vec![("workspace", self.workspace_id.as_str()), ("view", self.view_id.as_str())];
        args.extend(extra);
        self.api.call(endpoint, &self.scope, &args, config).await
    }

    async fn call(&self, endpoint: &Endpoint, config: ConfigParams) -> Result<Value> {
        self.call_with(endpoint, None, config).await
    }

    async fn call_id(&self, endpoint: &Endpoint, config: ConfigParams) -> Result<String> {
        let value = self.call(endpoint, config).await?;
        expect_id(endpoint, value)
    }

    async fn call_unit(&self, endpoint: &Endpoint, config: ConfigParams) -> Result<()> {
        self.call(endpoint, config).await.map(|_| ())
    }

    /// Full view metadata as returned upstream.
    pub async fn get_details(&self, config: ConfigParams) -> Result<Value> {
        self.call(&endpoints::DETAILS, config).await
    }

    pub async fn rename(&self, view_name: &str, config: ConfigParams) -> Result<()> {
        self.call_unit(&endpoints::RENAME, config.with("viewName", view_name)).await
    }

    pub async fn delete(&self, config: ConfigParams) -> Result<()> {
        self.call_unit(&endpoints::DELETE, config).await
    }

    /// Save a copy of the view under a new name; returns the new view id.
    pub async fn save_as(&self, new_view_name: &str, config: ConfigParams) -> Result<String> {
        self.call_id(&endpoints::SAVE_AS, config.with("viewName", new_view_name)).await
    }

    pub async fn copy_formulas(
        &self,
        formula_names: &[&str],
        dest_workspace_id: &str,
        config: ConfigParams,
    ) -> Result<()> {
        let config = config
            .with("formulaColumnNames", formula_names)
            .with("destWorkspaceId", dest_workspace_id);
        self.call_unit(&endpoints::COPY_FORMULAS, config).await
    }

    pub async fn add_favorite(&self) -> Result<()> {
        self.call_unit(&endpoints::ADD_FAVORITE, ConfigParams::new()).await
    }

    pub async fn remove_favorite(&self) -> Result<()> {
        self.call_unit(&endpoints::REMOVE_FAVORITE, ConfigParams::new()).await
    }

    pub async fn get_my_permissions(&self) -> Result<Value> {
        self.call(&endpoints::MY_PERMISSIONS, ConfigParams::new()).await
    }

    pub async fn get_view_url(&self, config: ConfigParams) -> Result<String> {
        self.call_id(&endpoints::VIEW_URL, config).await
    }

    pub async fn get_embed_url(&self, config: ConfigParams) -> Result<String> {
        self.call_id(&endpoints::EMBED_URL, config).await
    }

    pub async fn get_private_url(&self, config: ConfigParams) -> Result<String> {
        self.call_id(&endpoints::PRIVATE_URL, config).await
    }

    pub async fn remove_private_access(&self) -> Result<()> {
        self.call_unit(&endpoints::REMOVE_PRIVATE_ACCESS, ConfigParams::new()).await
    }

    pub async fn make_view_public(&self, config: ConfigParams) -> Result<String> {
        self.call_id(&endpoints::MAKE_PUBLIC, config).await
    }

    pub async fn remove_public_access(&self) -> Result<()> {
        self.call_unit(&endpoints::REMOVE_PUBLIC, ConfigParams::new()).await
    }

    /// Add a column and return its id.
    pub async fn add_column(&self, column_name: &str, data_type: &str, config: ConfigParams) -> Result<String> {
        let config = config.with("columnName", column_name).with("dataType", data_type);
        self.call_id(&endpoints::ADD_COLUMN, config).await
    }

    pub async fn hide_columns(&self, column_ids: &[&str]) -> Result<()> {
        self.call_unit(&endpoints::HIDE_COLUMNS, ConfigParams::new().with("columnIds", column_ids)).await
    }

    pub async fn show_columns(&self, column_ids: &[&str]) -> Result<()> {
        self.call_unit(&endpoints::SHOW_COLUMNS, ConfigParams::new().with("columnIds", column_ids)).await
    }

    pub async fn rename_column(&self, column_id: &str, column_name: &str, config: ConfigParams) -> Result<()> {
        let config = config.with("columnName", column_name);
        self.call_with(&endpoints::RENAME_COLUMN, Some(("column", column_id)), config).await.map(|_| ())
    }

    pub async fn delete_column(&self, column_id: &str, config: ConfigParams) -> Result<()> {
        self.call_with(&endpoints::DELETE_COLUMN, Some(("column", column_id)), config).await.map(|_| ())
    }

    /// Add one row; `columns` maps column names to values.
    pub async fn add_row(&self, columns: Value, config: ConfigParams) -> Result<Value> {
        self.call(&endpoints::ADD_ROW, config.with("columns", columns)).await
    }

    /// Update rows matching the `criteria` in `config` (all rows without one).
    pub async fn update_rows(&self, columns: Value, config: ConfigParams) -> Result<Value> {
        self.call(&endpoints::UPDATE_ROWS, config.with("columns", columns)).await
    }

    /// Delete rows matching `criteria`; returns the deleted row count.
    pub async fn delete_rows(&self, criteria: &str, config: ConfigParams) -> Result<Value> {
        self.call(&endpoints::DELETE_ROWS, config.with("criteria", criteria)).await
    }

    pub async fn get_custom_formulas(&self) -> Result<Vec<Value>> {
        let value = self.call(&endpoints::CUSTOM_FORMULAS, ConfigParams::new()).await?;
        super::endpoints::expect_list(&endpoints::CUSTOM_FORMULAS, value)
    }

    pub async fn add_custom_formula(
        &self,
        formula_name: &str,
        expression: &str,
        config: ConfigParams,
    ) -> Result<String> {
        let config = config.with("formulaName", formula_name).with("expression", expression);
        self.call_id(&endpoints::ADD_CUSTOM_FORMULA, config).await
    }

    pub async fn delete_custom_formula(&self, formula_id: &str, config: ConfigParams) -> Result<()> {
        self.call_with(&endpoints::DELETE_CUSTOM_FORMULA, Some(("formula", formula_id)), config)
            .await
            .map(|_| ())
    }

    /// Re-fetch the view's data from its source.
    pub async fn refetch_data(&self, config: ConfigParams) -> Result<()> {
        self.call_unit(&endpoints::REFETCH_DATA, config).await
    }

    pub async fn get_last_import_details(&self) -> Result<Value> {
        self.call(&endpoints::LAST_IMPORT_DETAILS, ConfigParams::new()).await
    }
}
