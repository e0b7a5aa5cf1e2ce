//! ZAnalytics Relay - HTTP front for the analytics client
//!
//! A small axum service that lets browser code fetch report and dashboard
//! metadata without holding OAuth credentials. Credentials are read once at
//! startup; every request goes through the shared [`AnalyticsClient`] and its
//! refresh-and-retry pipeline.
//!
//! # Architecture
//!
//! - **AppState**: the analytics client, relay settings and the rate limiter
//! - **Rate limiting**: fixed window per client address, applied to relayed routes
//! - **Routes**: `/report`, `/dashboard` and a public `/health`
//!
//! [`AnalyticsClient`]: zanalytics_infra::AnalyticsClient

mod error;
mod rate_limit;
mod routes;
mod state;

pub use self::error::RelayError;
pub use self::rate_limit::{limit_by_client, spawn_window_pruner};
pub use self::routes::{cors_layer, router};
pub use self::state::{AppState, ClientKey};
