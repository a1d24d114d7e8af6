//! Unpack engine: store -> one file per document
//!
//! Entries are written in ascending key order. The first failed write stops
//! the run; files already written stay where they are. Files in the output
//! directory that do not belong to any entry are never removed.

use crate::error::{store_error, EngineError};
use den_core::{FileNamer, OutputFormat};
use den_store::Store;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Name of the file sled creates in every store directory
const STORE_MARKER: &str = "db";

/// Result of a successful unpack
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnpackReport {
    /// Files written, in store key order
    pub files: Vec<PathBuf>,
}

/// Unpack the store at `store_dir` into `output_dir`
///
/// `format` must be `json`, `yml` or `yaml`; anything else is rejected
/// before the store is opened.
pub fn unpack(store_dir: &Path, output_dir: &Path, format: &str) -> Result<UnpackReport, EngineError> {
    let format: OutputFormat = format
        .parse()
        .map_err(|_| EngineError::UnsupportedFormat(format.to_string()))?;
    unpack_with(store_dir, output_dir, format)
}

/// Unpack with an already validated output format
pub fn unpack_with(
    store_dir: &Path,
    output_dir: &Path,
    format: OutputFormat,
) -> Result<UnpackReport, EngineError> {
    if !store_dir.join(STORE_MARKER).is_file() {
        warn!("Could not locate input store at {}", store_dir.display());
        return Err(EngineError::MissingStore(store_dir.to_path_buf()));
    }

    let store = Store::open(store_dir).map_err(store_error(store_dir))?;

    std::fs::create_dir_all(output_dir).map_err(|source| EngineError::Write {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let codec = format.format();
    let mut namer = FileNamer::new(format);
    let mut files = Vec::new();

    for entry in store.iter() {
        let document = entry.map_err(store_error(store_dir))?;

        let path = output_dir.join(namer.name_for(&document));
        let text = codec.render(&document).map_err(|source| EngineError::Serialize {
            key: document.key.clone(),
            source,
        })?;

        std::fs::write(&path, text).map_err(|source| EngineError::Write {
            path: path.clone(),
            source,
        })?;

        debug!(key = %document.key, file = %path.display(), "Unpacked document");
        files.push(path);
    }

    store.close().map_err(store_error(store_dir))?;

    info!(
        store = %store_dir.display(),
        output = %output_dir.display(),
        files = files.len(),
        format = %format,
        "Unpacked store"
    );

    Ok(UnpackReport { files })
}
