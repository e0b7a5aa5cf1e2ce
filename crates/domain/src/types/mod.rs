//! Domain types and models

pub mod envelope;
pub mod options;
pub mod params;

pub use envelope::{ErrorDetail, ErrorEnvelope};
pub use options::{FileType, ImportType, ResponseFormat};
pub use params::ConfigParams;
