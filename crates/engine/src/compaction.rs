//! Post-commit compaction step

use den_store::{Store, StoreError};
use tracing::debug;

/// What a compaction pass covered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompactionReport {
    pub first: String,
    pub last: String,
    /// Entries rewritten in `[first, last]`
    pub rewritten: usize,
}

/// Compact the full key range of a store
///
/// The range comes from one bounded forward lookup (first key) and one
/// bounded backward lookup (last key). An empty store is skipped.
pub fn compact(store: &Store) -> Result<Option<CompactionReport>, StoreError> {
    let (first, last) = match (store.first_key()?, store.last_key()?) {
        (Some(first), Some(last)) => (first, last),
        _ => {
            debug!(path = %store.path().display(), "Store empty, skipping compaction");
            return Ok(None);
        }
    };

    let rewritten = store.compact_range(&first, &last)?;
    debug!(
        path = %store.path().display(),
        first = %first,
        last = %last,
        rewritten,
        "Compacted store"
    );

    Ok(Some(CompactionReport {
        first,
        last,
        rewritten,
    }))
}
