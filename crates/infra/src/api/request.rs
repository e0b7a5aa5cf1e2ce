//! Request descriptors and unwrapped responses
//!
//! An [`ApiRequest`] is built per call by a façade, handed to the pipeline by
//! reference (so it can be re-issued after a token refresh) and dropped.

use std::path::{Path, PathBuf};

use reqwest::Method;
use serde_json::Value;
use zanalytics_domain::constants::ORG_ID_HEADER;
use zanalytics_domain::{AnalyticsError, ConfigParams, Result};

/// Body of a request. The variants are mutually exclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Payload {
    /// No body
    #[default]
    Empty,
    /// JSON request body
    Json(Value),
    /// Raw import data sent as the url-encoded form field `DATA`
    Data(String),
    /// File streamed as the multipart field `FILE`
    File(PathBuf),
    /// In-memory content sent as the multipart field `FILE`
    FileBytes { file_name: String, bytes: Vec<u8> },
}

impl Payload {
    /// Fail with `Io` if a file payload cannot be opened.
    ///
    /// Runs before any network activity, including the token fetch.
    pub async fn ensure_readable(&self) -> Result<()> {
        if let Self::File(path) = self {
            let metadata =
                tokio::fs::metadata(path).await.map_err(|e| AnalyticsError::io(path, &e))?;
            if !metadata.is_file() {
                return Err(AnalyticsError::Io {
                    path: path.clone(),
                    message: "not a regular file".to_string(),
                });
            }
            tokio::fs::File::open(path).await.map_err(|e| AnalyticsError::io(path, &e))?;
        }
        Ok(())
    }
}

/// Where the body of an export response goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportTarget {
    /// Return the raw bytes
    Memory,
    /// Stream the raw bytes into this file
    File(PathBuf),
}

/// One upstream call.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method sent upstream
    pub method: Method,
    /// Path below the analytics host, e.g. `/restapi/v2/orgs`
    pub path: String,
    /// Options sent as the `CONFIG` query parameter
    pub config: ConfigParams,
    /// Extra headers, e.g. the organization id
    pub headers: Vec<(String, String)>,
    pub payload: Payload,
    /// Set for export calls, whose body bypasses envelope parsing
    pub export: Option<ExportTarget>,
}

impl ApiRequest {
    /// Request with no options, headers or body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            config: ConfigParams::default(),
            headers: Vec::new(),
            payload: Payload::Empty,
            export: None,
        }
    }

    /// `GET` request for `path`.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// `POST` request for `path`.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// `PUT` request for `path`.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// `DELETE` request for `path`.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Replace the `CONFIG` options.
    #[must_use]
    pub fn config(mut self, config: ConfigParams) -> Self {
        self.config = config;
        self
    }

    /// Append a header; earlier headers with the same name are kept.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Scope the call to an organization.
    #[must_use]
    pub fn org(self, org_id: impl Into<String>) -> Self {
        self.header(ORG_ID_HEADER, org_id)
    }

    /// Send `body` as JSON.
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.payload = Payload::Json(body);
        self
    }

    /// Send import data inline as the form field `DATA`.
    #[must_use]
    pub fn data(mut self, data: impl Into<String>) -> Self {
        self.payload = Payload::Data(data.into());
        self
    }

    /// Upload the file at `path` as multipart `FILE`.
    #[must_use]
    pub fn file(mut self, path: impl AsRef<Path>) -> Self {
        self.payload = Payload::File(path.as_ref().to_path_buf());
        self
    }

    /// Upload in-memory bytes as multipart `FILE` named `file_name`.
    #[must_use]
    pub fn file_bytes(mut self, file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.payload = Payload::FileBytes { file_name: file_name.into(), bytes };
        self
    }

    /// Mark the call as an export: the body is returned raw, never parsed.
    #[must_use]
    pub fn export(mut self, target: ExportTarget) -> Self {
        self.export = Some(target);
        self
    }
}

/// Result of a pipeline call after envelope unwrapping.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// The envelope's `data` member
    Data(Value),
    /// 2xx without a body
    Empty,
    /// Raw export body
    Bytes(Vec<u8>),
    /// Export body written to disk
    Written { path: PathBuf, bytes: u64 },
}

impl ApiResponse {
    /// The unwrapped `data`, or `Null` for every other shape.
    pub fn into_data(self) -> Value {
        match self {
            Self::Data(value) => value,
            _ => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde_json::json;

    use super::*;

    #[test]
    fn builder_collects_parts() {
        let request = ApiRequest::post("/restapi/v2/workspaces")
            .org("42")
            .config(ConfigParams::new().with("workspaceName", "Sales"))
            .json(json!({"a": 1}));

        assert_eq!(request.method, Method::POST);
        assert_eq!(request.headers, vec![(ORG_ID_HEADER.to_string(), "42".to_string())]);
        assert_eq!(request.payload, Payload::Json(json!({"a": 1})));
        assert!(request.export.is_none());
    }

    #[test]
    fn later_payload_replaces_earlier_one() {
        let request = ApiRequest::post("/x").data("a,b\n1,2").file("/tmp/x.csv");
        assert_eq!(request.payload, Payload::File(PathBuf::from("/tmp/x.csv")));
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let payload = Payload::File(PathBuf::from("/definitely/not/here.csv"));
        assert!(matches!(payload.ensure_readable().await, Err(AnalyticsError::Io { .. })));
    }

    #[tokio::test]
    async fn directory_is_not_a_readable_file() {
        let dir = tempfile::tempdir().unwrap();
        let payload = Payload::File(dir.path().to_path_buf());
        assert!(matches!(payload.ensure_readable().await, Err(AnalyticsError::Io { .. })));
    }

    #[tokio::test]
    async fn existing_file_is_readable() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "a,b").unwrap();

        let payload = Payload::File(file.path().to_path_buf());
        assert!(payload.ensure_readable().await.is_ok());
        assert!(Payload::Empty.ensure_readable().await.is_ok());
    }

    #[test]
    fn into_data_projects_only_data() {
        assert_eq!(ApiResponse::Data(json!({"k": 1})).into_data(), json!({"k": 1}));
        assert_eq!(ApiResponse::Empty.into_data(), Value::Null);
        assert_eq!(ApiResponse::Bytes(vec![1]).into_data(), Value::Null);
    }
}
