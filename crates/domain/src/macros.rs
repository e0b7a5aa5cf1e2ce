//! Macro for implementing Display and FromStr for wire-level enums
//!
//! Option enums (import type, file type, response format) travel upstream as
//! lowercase strings inside `CONFIG`. This macro generates both directions
//! from one mapping table.
//!
//! # Example
//!
//! ```rust
//! use zanalytics_domain::impl_wire_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Permission {
//!     Read,
//!     Export,
//! }
//!
//! impl_wire_enum_conversions!(Permission {
//!     Read => "read",
//!     Export => "export",
//! });
//! ```

/// Implements Display and FromStr traits for wire enums
///
/// - Display writes the wire string
/// - FromStr parses case-insensitively; mapping strings must be lowercase
#[macro_export]
macro_rules! impl_wire_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }

        impl From<$enum_name> for serde_json::Value {
            fn from(value: $enum_name) -> Self {
                serde_json::Value::String(value.to_string())
            }
        }
    };
}
