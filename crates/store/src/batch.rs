//! Atomic write batches

use crate::error::StoreError;
use den_core::Document;

/// Staged puts and deletes, applied to a store in one atomic step
#[derive(Debug, Default)]
pub struct WriteBatch {
    pub(crate) inner: sled::Batch,
    puts: usize,
    deletes: usize,
}

impl WriteBatch {
    /// Create an empty batch
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a document write (payload stored as compact JSON)
    pub fn put(&mut self, document: &Document) -> Result<(), StoreError> {
        let value = serde_json::to_vec(&document.payload).map_err(|source| StoreError::Encode {
            key: document.key.clone(),
            source,
        })?;
        self.inner.insert(document.key.as_bytes(), value);
        self.puts += 1;
        Ok(())
    }

    /// Stage a key removal
    pub fn delete(&mut self, key: &str) {
        self.inner.remove(key.as_bytes());
        self.deletes += 1;
    }

    /// Number of staged puts
    pub fn puts(&self) -> usize {
        self.puts
    }

    /// Number of staged deletes
    pub fn deletes(&self) -> usize {
        self.deletes
    }

    pub fn is_empty(&self) -> bool {
        self.puts == 0 && self.deletes == 0
    }
}
