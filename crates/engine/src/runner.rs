//! Batch runner for many packs
//!
//! Each pack runs as its own blocking task and all tasks are awaited
//! together. Distinct packs share nothing, so they can run side by side; two
//! jobs aimed at the same store directory are never started together (the
//! later one is rejected up front).

use crate::error::EngineError;
use crate::pack::{pack, PackReport};
use crate::unpack::{unpack_with, UnpackReport};
use den_core::OutputFormat;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Pack descriptor supplied by the build pipeline
///
/// `label` and `type` are informational (used for logging only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackDescriptor {
    /// Pack folder, relative to the source and destination roots
    pub path: PathBuf,
    pub label: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// Which way a batch moves documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Source folders -> stores
    Pack,
    /// Stores -> source folders
    Unpack(OutputFormat),
}

/// One resolved unit of work
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackJob {
    pub descriptor: PackDescriptor,
    /// Folder of document files
    pub source_dir: PathBuf,
    /// Store directory
    pub store_dir: PathBuf,
}

impl PackJob {
    /// Resolve a descriptor against source and destination roots
    pub fn resolve(descriptor: PackDescriptor, src_root: &Path, dest_root: &Path) -> Self {
        Self {
            source_dir: src_root.join(&descriptor.path),
            store_dir: dest_root.join(&descriptor.path),
            descriptor,
        }
    }
}

/// What a finished job produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobReport {
    Packed(PackReport),
    Unpacked(UnpackReport),
}

/// Outcome of one job in a batch
#[derive(Debug)]
pub struct PackOutcome {
    pub descriptor: PackDescriptor,
    pub result: Result<JobReport, EngineError>,
}

impl PackOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

enum Slot {
    Done(PackOutcome),
    Running(PackDescriptor, JoinHandle<Result<JobReport, EngineError>>),
}

/// Run every job and collect one outcome per job, in input order
///
/// Failures never abort siblings: each is logged and reported in its
/// outcome. Must be called from within a tokio runtime.
pub async fn run_batch(jobs: Vec<PackJob>, direction: Direction) -> Vec<PackOutcome> {
    let mut claimed: HashMap<PathBuf, String> = HashMap::new();
    let mut slots = Vec::with_capacity(jobs.len());

    for job in jobs {
        let target: PathBuf = job.store_dir.components().collect();

        if let Some(first) = claimed.get(&target) {
            let err = EngineError::DuplicateTarget {
                path: job.store_dir.clone(),
                first: first.clone(),
            };
            warn!("Skipping {}: {}", job.descriptor.label, err);
            slots.push(Slot::Done(PackOutcome {
                descriptor: job.descriptor,
                result: Err(err),
            }));
            continue;
        }
        claimed.insert(target, job.descriptor.label.clone());

        let descriptor = job.descriptor.clone();
        let handle = tokio::task::spawn_blocking(move || run_job(&job, direction));
        slots.push(Slot::Running(descriptor, handle));
    }

    join_all(slots.into_iter().map(|slot| async move {
        match slot {
            Slot::Done(outcome) => outcome,
            Slot::Running(descriptor, handle) => {
                let result = handle.await.unwrap_or_else(|e| {
                    Err(EngineError::Task {
                        label: descriptor.label.clone(),
                        message: e.to_string(),
                    })
                });
                log_outcome(&descriptor, &result);
                PackOutcome { descriptor, result }
            }
        }
    }))
    .await
}

/// Run a single job on the current thread
pub fn run_job(job: &PackJob, direction: Direction) -> Result<JobReport, EngineError> {
    let descriptor = &job.descriptor;

    match direction {
        Direction::Pack => {
            info!("Packing: {} ({})", descriptor.label, descriptor.path.display());
            pack(&job.source_dir, &job.store_dir).map(JobReport::Packed)
        }
        Direction::Unpack(format) => {
            info!("Unpacking: {} ({})", descriptor.label, descriptor.path.display());
            unpack_with(&job.store_dir, &job.source_dir, format).map(JobReport::Unpacked)
        }
    }
}

fn log_outcome(descriptor: &PackDescriptor, result: &Result<JobReport, EngineError>) {
    match result {
        Ok(_) => {}
        Err(e) if e.is_recoverable() => {
            warn!("Skipped {} ({}): {}", descriptor.label, descriptor.path.display(), e);
        }
        Err(e) => {
            error!("Failed {} ({}): {}", descriptor.label, descriptor.path.display(), e);
        }
    }
}
