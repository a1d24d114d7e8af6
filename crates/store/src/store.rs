//! Exclusive pack store handle over sled
//!
//! Keys are the UTF-8 bytes of document keys, values are the compact JSON
//! encoding of the payload (without `_key`). sled keeps keys in ascending
//! byte order, which is the order scans and unpack see.

use crate::batch::WriteBatch;
use crate::error::StoreError;
use crate::lock::StoreLock;
use den_core::{Document, Payload};
use serde_json::Value;
use sled::{Db, IVec};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Open pack store
///
/// The handle owns the store for its whole lifetime: it holds the store's
/// lock file and flushes on drop, so every exit path releases it.
pub struct Store {
    /// Sled database (dropped before the lock)
    db: Db,
    /// Store directory
    path: PathBuf,
    _lock: StoreLock,
}

impl Store {
    /// Open or create a store at the given directory
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let lock = StoreLock::acquire(path)?;

        // Flushing is explicit (after commits and on close)
        let db = sled::Config::new()
            .path(path)
            .flush_every_ms(None)
            .open()?;

        debug!(path = %path.display(), "Opened store");

        Ok(Self {
            db,
            path: path.to_path_buf(),
            _lock: lock,
        })
    }

    /// Store directory
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of entries (full scan)
    pub fn len(&self) -> usize {
        self.db.len()
    }

    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }

    /// Get a payload by key
    pub fn get(&self, key: &str) -> Result<Option<Payload>, StoreError> {
        match self.db.get(key.as_bytes())? {
            Some(value) => Ok(Some(decode_payload(key, &value)?)),
            None => Ok(None),
        }
    }

    pub fn contains_key(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.db.contains_key(key.as_bytes())?)
    }

    /// All keys in ascending order
    pub fn keys(&self) -> Result<Vec<String>, StoreError> {
        self.db
            .iter()
            .keys()
            .map(|key| decode_key(&key?))
            .collect()
    }

    /// Iterate all entries in ascending key order
    pub fn iter(&self) -> Entries {
        Entries {
            inner: self.db.iter(),
        }
    }

    /// First key, from a forward scan bounded to one result
    pub fn first_key(&self) -> Result<Option<String>, StoreError> {
        self.db
            .iter()
            .keys()
            .next()
            .transpose()?
            .map(|key| decode_key(&key))
            .transpose()
    }

    /// Last key, from a backward scan bounded to one result
    pub fn last_key(&self) -> Result<Option<String>, StoreError> {
        self.db
            .iter()
            .keys()
            .next_back()
            .transpose()?
            .map(|key| decode_key(&key))
            .transpose()
    }

    /// Apply a batch atomically and flush it to disk
    ///
    /// Either every staged put and delete lands or none does.
    pub fn apply(&self, batch: WriteBatch) -> Result<(), StoreError> {
        let (puts, deletes) = (batch.puts(), batch.deletes());
        self.db.apply_batch(batch.inner)?;
        self.db.flush()?;
        debug!(path = %self.path.display(), puts, deletes, "Committed batch");
        Ok(())
    }

    /// Compact the key range `[first, last]`
    ///
    /// sled has no manual compaction call. Live entries in the range are
    /// rewritten in one atomic batch and flushed, which moves them out of
    /// fragmented log segments so the segment cleaner can reclaim those.
    /// Values are rewritten byte for byte. Returns the number of entries
    /// rewritten.
    pub fn compact_range(&self, first: &str, last: &str) -> Result<usize, StoreError> {
        if first > last {
            return Ok(0);
        }

        let mut batch = sled::Batch::default();
        let mut rewritten = 0usize;

        for item in self.db.range(first.as_bytes()..=last.as_bytes()) {
            let (key, value) = item?;
            batch.insert(key, value);
            rewritten += 1;
        }

        if rewritten > 0 {
            self.db.apply_batch(batch)?;
            self.db.flush()?;
        }

        Ok(rewritten)
    }

    /// Flush and release the store
    pub fn close(self) -> Result<(), StoreError> {
        self.db.flush()?;
        debug!(path = %self.path.display(), "Closed store");
        Ok(())
    }
}

impl Drop for Store {
    fn drop(&mut self) {
        if let Err(e) = self.db.flush() {
            warn!(path = %self.path.display(), "Failed to flush store on release: {}", e);
        }
    }
}

/// Ascending iterator over store entries
pub struct Entries {
    inner: sled::Iter,
}

impl Iterator for Entries {
    type Item = Result<Document, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.inner.next()?;
        Some(item.map_err(StoreError::from).and_then(|(key, value)| decode_entry(&key, &value)))
    }
}

fn decode_entry(key: &IVec, value: &IVec) -> Result<Document, StoreError> {
    let key = decode_key(key)?;
    let payload = decode_payload(&key, value)?;
    Ok(Document::new(key, payload))
}

fn decode_key(key: &IVec) -> Result<String, StoreError> {
    String::from_utf8(key.to_vec()).map_err(|e| StoreError::InvalidKey { key: e.into_bytes() })
}

fn decode_payload(key: &str, value: &IVec) -> Result<Payload, StoreError> {
    let value: Value = serde_json::from_slice(value).map_err(|source| StoreError::InvalidValue {
        key: key.to_string(),
        source,
    })?;

    match value {
        Value::Object(payload) => Ok(payload),
        _ => Err(StoreError::NotAMap {
            key: key.to_string(),
        }),
    }
}
