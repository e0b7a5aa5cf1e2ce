//! Declarative endpoint descriptors and the generic executor
//!
//! Each upstream operation is one [`Endpoint`] constant: verb, path template,
//! required `CONFIG` fields and the part of `data` the caller gets back. The
//! façades only pick a descriptor, supply ids and options, and convert the
//! projected value.

pub mod tables;

use serde_json::Value;
use zanalytics_domain::constants::API_PREFIX;
use zanalytics_domain::{AnalyticsError, ConfigParams, Result};

use super::client::ApiClient;
use super::request::{ApiRequest, ApiResponse};

/// HTTP verb of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    /// Read
    Get,
    /// Create or trigger
    Post,
    /// Update
    Put,
    /// Remove
    Delete,
}

impl Verb {
    /// The matching `reqwest` method.
    pub fn method(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Which part of the unwrapped `data` is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// The whole `data` value
    Data,
    /// One member of `data`
    Field(&'static str),
    /// Nothing; the call is performed for its effect
    Nothing,
}

impl Projection {
    /// Pick the projected part of a response; missing members become `Null`.
    pub fn apply(self, response: ApiResponse) -> Value {
        match self {
            Self::Data => response.into_data(),
            Self::Field(name) => match response.into_data() {
                Value::Object(mut fields) => fields.remove(name).unwrap_or(Value::Null),
                _ => Value::Null,
            },
            Self::Nothing => Value::Null,
        }
    }
}

/// One upstream operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    /// Operation name used in logs
    pub name: &'static str,
    pub verb: Verb,
    /// Path below `/restapi/v2` with `{placeholder}` segments
    pub path: &'static str,
    /// `CONFIG` members that must be present and non-blank
    pub required: &'static [&'static str],
    /// Part of `data` handed back to the caller
    pub projection: Projection,
}

impl Endpoint {
    /// Descriptor with no required fields that returns nothing.
    pub const fn new(name: &'static str, verb: Verb, path: &'static str) -> Self {
        Self { name, verb, path, required: &[], projection: Projection::Nothing }
    }

    /// `GET` descriptor returning the whole `data`.
    pub const fn get(name: &'static str, path: &'static str) -> Self {
        Self::new(name, Verb::Get, path).data()
    }

    /// `POST` descriptor returning nothing.
    pub const fn post(name: &'static str, path: &'static str) -> Self {
        Self::new(name, Verb::Post, path)
    }

    /// `PUT` descriptor returning nothing.
    pub const fn put(name: &'static str, path: &'static str) -> Self {
        Self::new(name, Verb::Put, path)
    }

    /// `DELETE` descriptor returning nothing.
    pub const fn delete(name: &'static str, path: &'static str) -> Self {
        Self::new(name, Verb::Delete, path)
    }

    /// `CONFIG` members checked before the call is sent.
    pub const fn requires(mut self, fields: &'static [&'static str]) -> Self {
        self.required = fields;
        self
    }

    /// Return only the member `name` of `data`.
    pub const fn field(mut self, name: &'static str) -> Self {
        self.projection = Projection::Field(name);
        self
    }

    /// Return the whole `data`.
    pub const fn data(mut self) -> Self {
        self.projection = Projection::Data;
        self
    }

    /// Expand the path template. Every placeholder needs a non-blank value;
    /// values are percent-encoded as single path segments.
    pub fn render(&self, args: &[(&str, &str)]) -> Result<String> {
        let mut rendered = String::from(API_PREFIX);
        let mut rest = self.path;

        while let Some(start) = rest.find('{') {
            rendered.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let end = after.find('}').ok_or_else(|| {
                AnalyticsError::Validation(format!("{}: malformed path template", self.name))
            })?;
            let key = &after[..end];

            let value = args
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| value.trim())
                .filter(|value| !value.is_empty())
                .ok_or_else(|| {
                    AnalyticsError::Validation(format!("{}: {key} id is required", self.name))
                })?;

            rendered.push_str(&urlencoding::encode(value));
            rest = &after[end + 1..];
        }

        rendered.push_str(rest);
        Ok(rendered)
    }

    /// Fail with `Validation` listing every required field absent from `config`.
    pub fn check_required(&self, config: &ConfigParams) -> Result<()> {
        let missing: Vec<&str> =
            self.required.iter().copied().filter(|field| !config.has_value(field)).collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AnalyticsError::Validation(format!(
                "{}: missing required field(s): {}",
                self.name,
                missing.join(", ")
            )))
        }
    }

    /// Validated request for this endpoint. Nothing is sent.
    pub fn request(&self, args: &[(&str, &str)], config: ConfigParams) -> Result<ApiRequest> {
        let path = self.render(args)?;
        self.check_required(&config)?;
        Ok(ApiRequest::new(self.verb.method(), path).config(config))
    }
}

/// Organization scope shared by every façade.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    pub org_id: Option<String>,
}

impl Scope {
    pub fn org(org_id: impl Into<String>) -> Self {
        Self { org_id: Some(org_id.into()) }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn apply(&self, request: ApiRequest) -> ApiRequest {
        match &self.org_id {
            Some(org_id) => request.org(org_id.clone()),
            None => request,
        }
    }
}

impl ApiClient {
    /// Validate, send and project one endpoint call.
    ///
    /// # Errors
    ///
    /// `Validation` before any network activity when an id or required field
    /// is missing; otherwise whatever [`ApiClient::execute`] returns.
    pub async fn call(
        &self,
        endpoint: &Endpoint,
        scope: &Scope,
        args: &[(&str, &str)],
        config: ConfigParams,
    ) -> Result<Value> {
        let request = scope.apply(endpoint.request(args, config)?);
        let response = self.execute(&request).await?;
        Ok(endpoint.projection.apply(response))
    }

    /// [`call`](Self::call) for endpoints that return an identifier.
    pub async fn call_id(
        &self,
        endpoint: &Endpoint,
        scope: &Scope,
        args: &[(&str, &str)],
        config: ConfigParams,
    ) -> Result<String> {
        let value = self.call(endpoint, scope, args, config).await?;
        expect_id(endpoint, value)
    }

    /// [`call`](Self::call) for endpoints that return an ordered list.
    pub async fn call_list(
        &self,
        endpoint: &Endpoint,
        scope: &Scope,
        args: &[(&str, &str)],
        config: ConfigParams,
    ) -> Result<Vec<Value>> {
        let value = self.call(endpoint, scope, args, config).await?;
        expect_list(endpoint, value)
    }

    /// [`call`](Self::call) for endpoints performed only for their effect.
    pub async fn call_unit(
        &self,
        endpoint: &Endpoint,
        scope: &Scope,
        args: &[(&str, &str)],
        config: ConfigParams,
    ) -> Result<()> {
        self.call(endpoint, scope, args, config).await.map(|_| ())
    }
}

pub(crate) fn expect_id(endpoint: &Endpoint, value: Value) -> Result<String> {
    match value {
        Value::String(id) => Ok(id),
        Value::Number(id) => Ok(id.to_string()),
        other => Err(AnalyticsError::Transport(format!(
            "malformed response body: {} returned no identifier (got {other})",
            endpoint.name
        ))),
    }
}

pub(crate) fn expect_list(endpoint: &Endpoint, value: Value) -> Result<Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Null => Ok(Vec::new()),
        other => Err(AnalyticsError::Transport(format!(
            "malformed response body: {} returned no list (got {other})",
            endpoint.name
        ))),
    }
}
