//! Enumerated option values understood by the upstream API

use serde::{Deserialize, Serialize};

use crate::impl_wire_enum_conversions;

/// How imported rows combine with existing table data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportType {
    Append,
    TruncateAdd,
    UpdateAdd,
}

impl_wire_enum_conversions!(ImportType {
    Append => "append",
    TruncateAdd => "truncateadd",
    UpdateAdd => "updateadd",
});

/// Format of an import payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Csv,
    Json,
}

impl_wire_enum_conversions!(FileType {
    Csv => "csv",
    Json => "json",
});

/// Format requested from an export call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    Csv,
    Json,
    Xml,
    Xls,
    Pdf,
    Html,
    Image,
}

impl_wire_enum_conversions!(ResponseFormat {
    Csv => "csv",
    Json => "json",
    Xml => "xml",
    Xls => "xls",
    Pdf => "pdf",
    Html => "html",
    Image => "image",
});
