//! Conversions from external infrastructure errors into domain errors.

use reqwest::Error as HttpError;
use serde_json::Error as JsonError;
use zanalytics_domain::AnalyticsError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub AnalyticsError);

impl From<InfraError> for AnalyticsError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<AnalyticsError> for InfraError {
    fn from(value: AnalyticsError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoAnalyticsError {
    fn into_analytics(self) -> AnalyticsError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → AnalyticsError */
/* -------------------------------------------------------------------------- */

impl IntoAnalyticsError for HttpError {
    fn into_analytics(self) -> AnalyticsError {
        if self.is_timeout() {
            return AnalyticsError::Transport("HTTP request timed out".into());
        }

        if self.is_connect() {
            return AnalyticsError::Transport(format!("HTTP connection failure: {self}"));
        }

        if self.is_decode() || self.is_body() {
            return AnalyticsError::Transport(format!("malformed response body: {self}"));
        }

        if self.is_builder() {
            return AnalyticsError::Transport(format!("invalid HTTP request: {self}"));
        }

        AnalyticsError::Transport(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_analytics())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → AnalyticsError */
/* -------------------------------------------------------------------------- */

impl IntoAnalyticsError for JsonError {
    fn into_analytics(self) -> AnalyticsError {
        AnalyticsError::Transport(format!("malformed response body: {self}"))
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_analytics())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use reqwest::Client;

    use super::*;

    #[tokio::test]
    async fn connection_refused_maps_to_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.get(format!("http://{addr}")).send().await.unwrap_err();

        let mapped: AnalyticsError = InfraError::from(error).into();
        match mapped {
            AnalyticsError::Transport(msg) => assert!(msg.contains("connection")),
            other => panic!("expected transport error, got {:?}", other),
        }
    }

    #[test]
    fn json_error_maps_to_transport_error() {
        let error = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();

        let mapped: AnalyticsError = InfraError::from(error).into();
        match mapped {
            AnalyticsError::Transport(msg) => assert!(msg.contains("malformed")),
            other => panic!("expected transport error, got {:?}", other),
        }
    }
}
