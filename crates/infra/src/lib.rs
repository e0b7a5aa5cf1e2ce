//! # ZAnalytics Infrastructure
//!
//! All I/O of the analytics client lives here.
//!
//! This crate contains:
//! - The HTTP transport wrapper
//! - OAuth token management and the request pipeline
//! - Endpoint tables and the resource façades
//! - Configuration loading from environment and files
//!
//! ## Architecture
//! - Types and errors come from `zanalytics-domain`
//! - Nothing here retries except the single refresh-and-retry on token expiry

pub mod api;
pub mod config;
pub mod errors;
pub mod http;

// Re-export commonly used items
pub use api::*;
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
