//! Store error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the pack store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sled::Error),

    #[error("store at {} is already open (lock held{})", path.display(), owner_suffix(*pid))]
    Locked { path: PathBuf, pid: Option<u32> },

    #[error("failed to lock store at {}: {source}", path.display())]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("stored key is not valid UTF-8: {key:?}")]
    InvalidKey { key: Vec<u8> },

    #[error("stored value for `{key}` is not valid JSON: {source}")]
    InvalidValue {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("stored value for `{key}` is not a map")]
    NotAMap { key: String },

    #[error("failed to encode value for `{key}`: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

fn owner_suffix(pid: Option<u32>) -> String {
    match pid {
        Some(pid) => format!(" by pid {}", pid),
        None => String::new(),
    }
}
