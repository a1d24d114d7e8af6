//! Engine error taxonomy
//!
//! Configuration and format errors are recoverable at batch level: the pack
//! is skipped and its siblings keep going. Everything else is fatal to the
//! single pack or unpack call that raised it.

use den_core::CodecError;
use den_store::StoreError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error classification used for reporting and recovery decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Missing or invalid input/target location
    Configuration,
    /// Unsupported unpack output format
    Format,
    /// Malformed or inconsistent source document
    Parse,
    /// Source directory or file could not be read
    Read,
    /// Unpacked file could not be produced
    Write,
    /// Store could not be opened, read or committed
    Store,
    /// Background task died
    Task,
}

/// Errors returned by pack, unpack and the batch runner
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("could not locate input data folder at {}", .0.display())]
    MissingSource(PathBuf),

    #[error("input data path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("could not locate input store at {}", .0.display())]
    MissingStore(PathBuf),

    #[error("store {} is already targeted by pack `{first}`", path.display())]
    DuplicateTarget { path: PathBuf, first: String },

    #[error("unsupported output format `{0}` (expected json, yml or yaml)")]
    UnsupportedFormat(String),

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: CodecError,
    },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize `{key}`: {source}")]
    Serialize {
        key: String,
        #[source]
        source: CodecError,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("store {}: {source}", path.display())]
    Store {
        path: PathBuf,
        #[source]
        source: StoreError,
    },

    #[error("task for `{label}` failed: {message}")]
    Task { label: String, message: String },
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::MissingSource(_)
            | EngineError::NotADirectory(_)
            | EngineError::MissingStore(_)
            | EngineError::DuplicateTarget { .. } => ErrorKind::Configuration,
            EngineError::UnsupportedFormat(_) => ErrorKind::Format,
            EngineError::Parse { .. } => ErrorKind::Parse,
            EngineError::Read { .. } => ErrorKind::Read,
            EngineError::Serialize { .. } | EngineError::Write { .. } => ErrorKind::Write,
            EngineError::Store { .. } => ErrorKind::Store,
            EngineError::Task { .. } => ErrorKind::Task,
        }
    }

    /// Whether a batch may skip this pack and carry on
    pub fn is_recoverable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Configuration | ErrorKind::Format)
    }
}

/// Attach the store directory to a store error
pub(crate) fn store_error(path: &Path) -> impl Fn(StoreError) -> EngineError + '_ {
    move |source| EngineError::Store {
        path: path.to_path_buf(),
        source,
    }
}
