//! Imports and exports for one workspace

use std::path::Path;

use serde_json::Value;
use tracing::{debug, info, instrument};
use zanalytics_domain::constants::BATCH_START_KEY;
use zanalytics_domain::{
    AnalyticsError, ConfigParams, FileType, ImportType, ResponseFormat, Result,
};

use super::batch::BatchReader;
use super::client::ApiClient;
use super::endpoints::tables::bulk as endpoints;
use super::endpoints::{expect_id, Endpoint, Scope};
use super::request::{ApiRequest, ApiResponse, ExportTarget};

/// Import and export operations of one workspace.
#[derive(Clone)]
pub struct BulkApi {
    api: ApiClient,
    scope: Scope,
    workspace_id: String,
}

/// Where an import's rows come from.
#[derive(Debug, Clone, Copy)]
pub enum ImportSource<'a> {
    /// File streamed as multipart `FILE`
    File(&'a Path),
    /// Inline text sent as the form field `DATA`
    Data(&'a str),
}

impl BulkApi {
    pub(crate) fn new(api: ApiClient, scope: Scope, workspace_id: String) -> Self {
        Self { api, scope, workspace_id }
    }

    fn request(&self, endpoint: &Endpoint, extra: &[(&str, &str)], config: ConfigParams) -> Result<ApiRequest> {
        let mut args = vec![("workspace", self.workspace_id.as_str())];
        args.extend_from_slice(extra);
        Ok(self.scope.apply(endpoint.request(&args, config)?))
    }

    async fn send(&self, endpoint: &Endpoint, request: ApiRequest) -> Result<Value> {
        let response = self.api.execute(&request).await?;
        Ok(endpoint.projection.apply(response))
    }

    fn attach(request: ApiRequest, source: ImportSource<'_>) -> ApiRequest {
        match source {
            ImportSource::File(path) => request.file(path),
            ImportSource::Data(data) => request.data(data),
        }
    }

    fn import_config(file_type: FileType, auto_identify: bool, config: ConfigParams) -> ConfigParams {
        config.with("fileType", file_type).with("autoIdentify", auto_identify.to_string())
    }

    /// Create a table from the imported data; returns the import summary.
    pub async fn import_data_in_new_table(
        &self,
        table_name: &str,
        file_type: FileType,
        auto_identify: bool,
        source: ImportSource<'_>,
        config: ConfigParams,
    ) -> Result<Value> {
        let config = Self::import_config(file_type, auto_identify, config).with("tableName", table_name);
        let request = self.request(&endpoints::IMPORT_NEW_TABLE, &[], config)?;
        self.send(&endpoints::IMPORT_NEW_TABLE, Self::attach(request, source)).await
    }

    /// Import into an existing view; returns the import summary.
    pub async fn import_data(
        &self,
        view_id: &str,
        import_type: ImportType,
        file_type: FileType,
        auto_identify: bool,
        source: ImportSource<'_>,
        config: ConfigParams,
    ) -> Result<Value> {
        let config = Self::import_config(file_type, auto_identify, config).with("importType", import_type);
        let request = self.request(&endpoints::IMPORT, &[("view", view_id)], config)?;
        self.send(&endpoints::IMPORT, Self::attach(request, source)).await
    }

    /// Start an asynchronous import into a new table; returns the job id.
    pub async fn import_bulk_data_in_new_table(
        &self,
        table_name: &str,
        file_type: FileType,
        auto_identify: bool,
        file_path: &Path,
        config: ConfigParams,
    ) -> Result<String> {
        let endpoint = &endpoints::IMPORT_NEW_TABLE_ASYNC;
        let config = Self::import_config(file_type, auto_identify, config).with("tableName", table_name);
        let request = self.request(endpoint, &[], config)?.file(file_path);
        expect_id(endpoint, self.send(endpoint, request).await?)
    }

    /// Start an asynchronous import into an existing view; returns the job id.
    pub async fn import_bulk_data(
        &self,
        view_id: &str,
        import_type: ImportType,
        file_type: FileType,
        auto_identify: bool,
        file_path: &Path,
        config: ConfigParams,
    ) -> Result<String> {
        let endpoint = &endpoints::IMPORT_ASYNC;
        let config = Self::import_config(file_type, auto_identify, config).with("importType", import_type);
        let request = self.request(endpoint, &[("view", view_id)], config)?.file(file_path);
        expect_id(endpoint, self.send(endpoint, request).await?)
    }

    /// Upload a large CSV file in line batches; returns the job id.
    ///
    /// Each chunk carries the header line. The first request uses the batch
    /// key `start`, later ones the key returned by the previous response.
    /// Chunks are spaced by the configured batch delay. A failed chunk aborts
    /// the remaining ones.
    #[instrument(skip(self, file_path, config), fields(workspace = %self.workspace_id, file = %file_path.display()))]
    pub async fn import_bulk_data_as_batches(
        &self,
        view_id: &str,
        import_type: ImportType,
        auto_identify: bool,
        file_path: &Path,
        batch_size: usize,
        config: ConfigParams,
    ) -> Result<String> {
        let endpoint = &endpoints::IMPORT_BATCH;
        let file_name = file_path
            .file_name()
            .map_or_else(|| "batch.csv".to_string(), |name| name.to_string_lossy().into_owned());

        let mut reader = BatchReader::open(file_path, batch_size).await?;
        let mut batch_key = BATCH_START_KEY.to_string();

        while let Some(chunk) = reader.next_chunk().await? {
            if chunk.index > 0 {
                tokio::time::sleep(self.api.config().batch_delay()).await;
            }

            let chunk_config = Self::import_config(FileType::Csv, auto_identify, config.clone())
                .with("importType", import_type)
                .with("batchKey", batch_key.as_str())
                .with("isLastBatch", chunk.is_last.to_string());
            let request = self
                .request(endpoint, &[("view", view_id)], chunk_config)?
                .file_bytes(file_name.clone(), chunk.body);

            debug!(batch = chunk.index, rows = chunk.rows, is_last = chunk.is_last, "uploading batch");
            let data = self.send(endpoint, request).await?;

            if chunk.is_last {
                let job_id = expect_id(endpoint, data.get("jobId").cloned().unwrap_or(Value::Null))?;
                info!(batches = chunk.index + 1, %job_id, "batch import submitted");
                return Ok(job_id);
            }

            batch_key = match data.get("batchKey") {
                Some(Value::String(key)) if !key.is_empty() => key.clone(),
                Some(Value::Number(key)) => key.to_string(),
                _ => {
                    return Err(AnalyticsError::Transport(format!(
                        "malformed response body: batch {} returned no batchKey",
                        chunk.index
                    )))
                }
            };
        }

        Err(AnalyticsError::Validation("import data has no data lines".to_string()))
    }

    pub async fn get_import_job_details(&self, job_id: &str) -> Result<Value> {
        let endpoint = &endpoints::IMPORT_JOB;
        let request = self.request(endpoint, &[("job", job_id)], ConfigParams::new())?;
        self.send(endpoint, request).await
    }

    /// Export a view into `file_path`; returns the number of bytes written.
    pub async fn export_data(
        &self,
        view_id: &str,
        response_format: ResponseFormat,
        file_path: &Path,
        config: ConfigParams,
    ) -> Result<u64> {
        let config = config.with("responseFormat", response_format);
        let request = self
            .request(&endpoints::EXPORT, &[("view", view_id)], config)?
            .export(ExportTarget::File(file_path.to_path_buf()));
        written(self.api.execute(&request).await?)
    }

    /// Export a view and return the raw bytes.
    pub async fn export_data_to_bytes(
        &self,
        view_id: &str,
        response_format: ResponseFormat,
        config: ConfigParams,
    ) -> Result<Vec<u8>> {
        let config = config.with("responseFormat", response_format);
        let request = self
            .request(&endpoints::EXPORT, &[("view", view_id)], config)?
            .export(ExportTarget::Memory);
        bytes(self.api.execute(&request).await?)
    }

    /// Export the result of a SQL query into `file_path`.
    pub async fn export_data_using_sql(
        &self,
        sql_query: &str,
        response_format: ResponseFormat,
        file_path: &Path,
        config: ConfigParams,
    ) -> Result<u64> {
        let config = config.with("sqlQuery", sql_query).with("responseFormat", response_format);
        let request = self
            .request(&endpoints::EXPORT_QUERY, &[], config)?
            .export(ExportTarget::File(file_path.to_path_buf()));
        written(self.api.execute(&request).await?)
    }

    /// Start an asynchronous export of a view; returns the job id.
    pub async fn initiate_bulk_export(
        &self,
        view_id: &str,
        response_format: ResponseFormat,
        config: ConfigParams,
    ) -> Result<String> {
        let endpoint = &endpoints::EXPORT_ASYNC;
        let config = config.with("responseFormat", response_format);
        let request = self.request(endpoint, &[("view", view_id)], config)?;
        expect_id(endpoint, self.send(endpoint, request).await?)
    }

    /// Start an asynchronous export of a SQL query result; returns the job id.
    pub async fn initiate_bulk_export_using_sql(
        &self,
        sql_query: &str,
        response_format: ResponseFormat,
        config: ConfigParams,
    ) -> Result<String> {
        let endpoint = &endpoints::EXPORT_QUERY_ASYNC;
        let config = config.with("sqlQuery", sql_query).with("responseFormat", response_format);
        let request = self.request(endpoint, &[], config)?;
        expect_id(endpoint, self.send(endpoint, request).await?)
    }

    pub async fn get_export_job_details(&self, job_id: &str) -> Result<Value> {
        let endpoint = &endpoints::EXPORT_JOB;
        let request = self.request(endpoint, &[("job", job_id)], ConfigParams::new())?;
        self.send(endpoint, request).await
    }

    /// Download the output of a finished export job into `file_path`.
    pub async fn export_bulk_data(&self, job_id: &str, file_path: &Path) -> Result<u64> {
        let request = self
            .request(&endpoints::EXPORT_JOB_DATA, &[("job", job_id)], ConfigParams::new())?
            .export(ExportTarget::File(file_path.to_path_buf()));
        written(self.api.execute(&request).await?)
    }
}

fn written(response: ApiResponse) -> Result<u64> {
    match response {
        ApiResponse::Written { bytes, .. } => Ok(bytes),
        other => Err(AnalyticsError::Transport(format!("unexpected export response: {other:?}"))),
    }
}

fn bytes(response: ApiResponse) -> Result<Vec<u8>> {
    match response {
        ApiResponse::Bytes(bytes) => Ok(bytes),
        other => Err(AnalyticsError::Transport(format!("unexpected export response: {other:?}"))),
    }
}
