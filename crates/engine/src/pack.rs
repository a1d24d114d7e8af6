//! Pack engine: source directory -> store
//!
//! One call walks `Validated -> Opened -> Staged -> Committed ->
//! Compacted -> Closed`. Puts for every source document and deletes for every
//! stale store key go into a single batch, so the store either reflects the
//! whole source directory or is left as it was. The store handle releases
//! itself on drop, which covers every early return below.

use crate::compaction::{compact, CompactionReport};
use crate::error::{store_error, EngineError};
use crate::source;
use den_core::Document;
use den_store::{Store, WriteBatch};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};

/// Pack lifecycle stages, reported in debug logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackState {
    Validated,
    Opened,
    Staged,
    Committed,
    Compacted,
    Closed,
}

/// Result of a successful pack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackReport {
    /// Documents written (one per distinct key)
    pub puts: usize,
    /// Stale keys removed from the store
    pub deletes: usize,
    /// Compaction pass, if one ran
    pub compaction: Option<CompactionReport>,
}

/// Pack every document file in `source_dir` into the store at `store_dir`
///
/// A missing source directory is reported as a configuration error before
/// the store is touched. Parse failures abort without committing anything.
pub fn pack(source_dir: &Path, store_dir: &Path) -> Result<PackReport, EngineError> {
    if !source_dir.exists() {
        warn!("Could not locate input data folder at {}", source_dir.display());
        return Err(EngineError::MissingSource(source_dir.to_path_buf()));
    }
    if !source_dir.is_dir() {
        return Err(EngineError::NotADirectory(source_dir.to_path_buf()));
    }
    let files = source::scan(source_dir)?;
    trace_state(PackState::Validated, store_dir);

    let store = Store::open(store_dir).map_err(store_error(store_dir))?;
    trace_state(PackState::Opened, store_dir);

    let report = stage_and_commit(&store, &files)?;

    store.close().map_err(store_error(store_dir))?;
    trace_state(PackState::Closed, store_dir);

    info!(
        source = %source_dir.display(),
        store = %store_dir.display(),
        puts = report.puts,
        deletes = report.deletes,
        "Packed store"
    );

    Ok(report)
}

fn stage_and_commit(store: &Store, files: &[source::SourceFile]) -> Result<PackReport, EngineError> {
    let store_dir = store.path();
    let mut batch = WriteBatch::new();
    let mut seen: HashMap<String, usize> = HashMap::with_capacity(files.len());
    let mut staged: Vec<(&Path, Document)> = Vec::with_capacity(files.len());

    // Files arrive in name order; a repeated key keeps the later file
    for file in files {
        let document = file.read()?;

        match seen.get(&document.key).copied() {
            Some(slot) => {
                warn!(
                    key = %document.key,
                    file = %file.path.display(),
                    earlier = %staged[slot].0.display(),
                    "Duplicate key, later file wins"
                );
                staged[slot] = (file.path.as_path(), document);
            }
            None => {
                seen.insert(document.key.clone(), staged.len());
                staged.push((file.path.as_path(), document));
            }
        }
    }

    for (_, document) in &staged {
        batch.put(document).map_err(store_error(store_dir))?;
    }

    // Reconcile: anything the source no longer has goes away
    for key in store.keys().map_err(store_error(store_dir))? {
        if !seen.contains_key(&key) {
            debug!(key = %key, "Removing stale key");
            batch.delete(&key);
        }
    }
    trace_state(PackState::Staged, store_dir);

    let (puts, deletes) = (batch.puts(), batch.deletes());
    store.apply(batch).map_err(store_error(store_dir))?;
    trace_state(PackState::Committed, store_dir);

    let compaction = if seen.is_empty() {
        None
    } else {
        let report = compact(store).map_err(store_error(store_dir))?;
        trace_state(PackState::Compacted, store_dir);
        report
    };

    Ok(PackReport {
        puts,
        deletes,
        compaction,
    })
}

fn trace_state(state: PackState, store_dir: &Path) {
    debug!(state = ?state, store = %store_dir.display(), "Pack state");
}
