//! Compendium pack/unpack engine
//!
//! This crate provides:
//! - `pack`: folder of YAML/JSON documents -> store (atomic, reconciled)
//! - `unpack`: store -> one file per document
//! - Post-commit range compaction
//! - A batch runner that drives many packs as concurrent tasks
//!
//! Every call takes its directories explicitly and opens and closes its own
//! store handle; nothing is cached between calls.

pub mod compaction;
pub mod error;
pub mod pack;
pub mod runner;
pub mod source;
pub mod unpack;

// Re-exports
pub use compaction::{compact, CompactionReport};
pub use error::{EngineError, ErrorKind};
pub use pack::{pack, PackReport, PackState};
pub use runner::{run_batch, run_job, Direction, JobReport, PackDescriptor, PackJob, PackOutcome};
pub use unpack::{unpack, unpack_with, UnpackReport};

pub use den_core::OutputFormat;
