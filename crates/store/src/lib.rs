//! Pack store and write batches
//!
//! This crate provides:
//! - Exclusive store handles over sled (one open handle per store directory)
//! - Atomic write batches of puts and deletes
//! - Ordered scans and bounded first/last key lookups
//! - Range compaction
//! - Per-store lock files

pub mod batch;
pub mod error;
pub mod lock;
pub mod store;

// Re-exports
pub use batch::WriteBatch;
pub use error::StoreError;
pub use lock::StoreLock;
pub use store::{Entries, Store};

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
