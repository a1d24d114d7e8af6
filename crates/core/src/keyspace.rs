//! Keyspace codec: document -> file name
//!
//! File names are cosmetic. Pack reads the key back from the `_key` field, so
//! the only requirements here are that names are safe on every filesystem and
//! that one unpack run never writes two documents to the same file.

use crate::document::Document;
use crate::format::OutputFormat;
use std::collections::HashSet;

/// Replace every character outside `[A-Za-z0-9]` with `_`
pub fn sanitize(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// File stem for a document, without collision handling
///
/// Named documents become `<name>_<id>` (the id falls back to the key);
/// unnamed documents use their key. Every part is sanitized.
pub fn file_stem(document: &Document) -> String {
    let stem = match document.name() {
        Some(name) => {
            let suffix = document.id().unwrap_or(&document.key);
            format!("{}_{}", sanitize(name), sanitize(suffix))
        }
        None => sanitize(&document.key),
    };

    if stem.is_empty() {
        "_".to_string()
    } else {
        stem
    }
}

/// Hands out unique file names for one unpack run
#[derive(Debug)]
pub struct FileNamer {
    extension: &'static str,
    taken: HashSet<String>,
}

impl FileNamer {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            extension: format.extension(),
            taken: HashSet::new(),
        }
    }

    /// Next free file name for `document` (stem plus extension)
    ///
    /// A stem already used in this run gets `_2`, `_3`, ... appended.
    pub fn name_for(&mut self, document: &Document) -> String {
        let stem = file_stem(document);

        let mut candidate = format!("{}.{}", stem, self.extension);
        let mut n = 2usize;
        while self.taken.contains(&candidate) {
            candidate = format!("{}_{}.{}", stem, n, self.extension);
            n += 1;
        }

        self.taken.insert(candidate.clone());
        candidate
    }
}
