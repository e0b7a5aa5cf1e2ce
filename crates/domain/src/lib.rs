//! # ZAnalytics Domain
//!
//! Domain types shared by the analytics client and the relay.
//!
//! This crate contains:
//! - The error taxonomy and `Result` alias
//! - Credentials, client and relay configuration structures
//! - The `CONFIG` query parameter codec
//! - Wire-level constants of the upstream API
//!
//! ## Architecture
//! - No dependencies on other ZAnalytics crates
//! - No I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
