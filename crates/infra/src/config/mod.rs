//! Configuration loading
//!
//! This module provides utilities for loading credentials, client settings
//! and relay settings from environment variables and files.

pub mod loader;

// Re-export commonly used items
pub use loader::{
    load, load_client_config_from_env, load_credentials_from_env, load_from_file,
    load_relay_config_from_env,
};
