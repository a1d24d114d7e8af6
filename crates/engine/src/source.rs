//! Source directory scanning
//!
//! A pack's source is a flat folder: only regular files directly inside it
//! are documents. Sub-directories and hidden dot-files (`.gitkeep`,
//! editor swap files) are skipped.

use crate::error::EngineError;
use den_core::{Document, Format};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A document file found in a source directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Parser chosen from the file extension
    pub format: Format,
}

impl SourceFile {
    pub fn new(path: PathBuf) -> Self {
        let format = Format::from_path(&path);
        Self { path, format }
    }

    /// Read and parse the file into a document
    pub fn read(&self) -> Result<Document, EngineError> {
        let text = std::fs::read_to_string(&self.path).map_err(|source| EngineError::Read {
            path: self.path.clone(),
            source,
        })?;

        self.format.parse(&text).map_err(|source| EngineError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

/// List document files directly inside `dir`, ordered by file name
pub fn scan(dir: &Path) -> Result<Vec<SourceFile>, EngineError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| EngineError::Read {
            path: e.path().unwrap_or(dir).to_path_buf(),
            source: e.into(),
        })?;

        if !entry.file_type().is_file() || is_hidden(entry.path()) {
            continue;
        }

        files.push(SourceFile::new(entry.into_path()));
    }

    Ok(files)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}
