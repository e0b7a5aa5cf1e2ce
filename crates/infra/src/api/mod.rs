//! Analytics API client
//!
//! Every call flows through [`ApiClient::execute`], which attaches the access
//! token, unwraps the response envelope and refreshes the token once when the
//! upstream reports it expired. The façades ([`OrgApi`], [`WorkspaceApi`],
//! [`ViewApi`], [`BulkApi`]) are thin tables of endpoint descriptors over it.

pub mod analytics;
pub mod auth;
pub mod batch;
pub mod bulk;
pub mod client;
pub mod endpoints;
pub mod org;
pub mod request;
pub mod view;
pub mod workspace;

#[cfg(test)]
pub(crate) mod testing;

pub use analytics::AnalyticsClient;
pub use auth::{AccessTokenProvider, TokenManager};
pub use batch::{split_into_batches, BatchReader, Chunk};
pub use bulk::{BulkApi, ImportSource};
pub use client::{ApiClient, ApiClientBuilder};
pub use endpoints::{Endpoint, Projection, Scope, Verb};
pub use org::OrgApi;
pub use request::{ApiRequest, ApiResponse, ExportTarget, Payload};
pub use view::ViewApi;
pub use workspace::WorkspaceApi;
