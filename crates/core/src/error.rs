//! Codec error types

use thiserror::Error;

/// Errors raised while converting between document files and records
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Top level of the file was a list, scalar or null
    #[error("document must be a map, found {found}")]
    NotAMap { found: &'static str },

    /// `.inf`, `-.inf` or `.nan`, which stored JSON cannot represent
    #[error("non-finite number at `{field}` cannot be stored")]
    NonFiniteNumber { field: String },

    #[error("document has no `_key` field")]
    MissingKey,

    #[error("`_key` must be a non-empty string")]
    InvalidKey,

    #[error("unsupported output format `{0}` (expected json, yml or yaml)")]
    UnsupportedFormat(String),
}
