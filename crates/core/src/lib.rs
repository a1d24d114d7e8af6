//! Den Core - Document model and file codecs for compendium packs
//!
//! This crate provides the leaf components shared by pack and unpack:
//! - Document records (store key + structured payload)
//! - Keyspace codec (filesystem-safe file names for documents)
//! - Serialization adapter (YAML/JSON text <-> documents, `_key` injection)

pub mod document;
pub mod error;
pub mod format;
pub mod keyspace;

// Re-export main types for convenience
pub use document::{Document, Payload, ID_FIELD, KEY_FIELD, NAME_FIELD};
pub use error::CodecError;
pub use format::{Format, OutputFormat};
pub use keyspace::{sanitize, FileNamer};

/// Common result type used throughout den-core
pub type Result<T> = std::result::Result<T, CodecError>;
