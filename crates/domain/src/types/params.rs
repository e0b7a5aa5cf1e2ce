//! `CONFIG` query parameter codec
//!
//! Every structured, non-body parameter travels upstream as one query
//! parameter named `CONFIG` whose value is the URL-encoded JSON object of all
//! options. `decode(encode(params)) == params` for any JSON object.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::form_urlencoded;

use crate::constants::CONFIG_PARAM;
use crate::errors::{AnalyticsError, Result};

/// Opaque key/value options forwarded to the upstream API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigParams(Map<String, Value>);

impl ConfigParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// `true` when `key` holds something other than null or an empty string.
    pub fn has_value(&self, key: &str) -> bool {
        match self.0.get(key) {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.trim().is_empty(),
            Some(_) => true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Copy every entry of `other` over this one; `other` wins on conflict.
    pub fn merge(&mut self, other: &Self) {
        for (key, value) in &other.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Compact JSON text of the options.
    pub fn to_json(&self) -> String {
        Value::Object(self.0.clone()).to_string()
    }

    /// Query-string form: `CONFIG=<url-encoded JSON>`, or an empty string when
    /// there are no options.
    pub fn encode(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        form_urlencoded::Serializer::new(String::new())
            .append_pair(CONFIG_PARAM, &self.to_json())
            .finish()
    }

    /// Parse a query string and recover the `CONFIG` object.
    ///
    /// A query without a `CONFIG` pair decodes to empty options.
    pub fn decode(query: &str) -> Result<Self> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let Some((_, raw)) =
            form_urlencoded::parse(query.as_bytes()).find(|(key, _)| key == CONFIG_PARAM)
        else {
            return Ok(Self::default());
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            Ok(other) => Err(AnalyticsError::Validation(format!(
                "CONFIG must be a JSON object, got {other}"
            ))),
            Err(err) => Err(AnalyticsError::Validation(format!("CONFIG is not valid JSON: {err}"))),
        }
    }
}

impl From<Map<String, Value>> for ConfigParams {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ConfigParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
