//! Lock file management for store exclusivity
//!
//! Every open store holds an exclusive, non-blocking `flock` on
//! `<store>/den.lock`. The owner PID is written into the file so a refused
//! open can say who holds the store.

use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Per-store exclusive-ownership token
#[derive(Debug)]
pub struct StoreLock {
    path: PathBuf,
    #[allow(dead_code)]
    file: File,
}

/// Lock file content
#[derive(Debug, Serialize, Deserialize)]
struct LockContent {
    pid: u32,
    acquired_at: u64,
}

impl StoreLock {
    /// Name of the lock file inside the store directory
    pub const FILE_NAME: &'static str = "den.lock";

    /// Acquire the exclusive lock for a store directory
    ///
    /// Creates the directory if needed. Returns `StoreError::Locked` if the
    /// store is already held, by this process or another one.
    pub fn acquire(store_dir: &Path) -> Result<Self, StoreError> {
        let lock_path = store_dir.join(Self::FILE_NAME);
        let lock_err = |source| StoreError::Lock {
            path: store_dir.to_path_buf(),
            source,
        };

        std::fs::create_dir_all(store_dir).map_err(lock_err)?;

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(lock_err)?;

        if !try_flock_exclusive(&file).map_err(lock_err)? {
            let pid = read_lock_content(&mut file).ok().map(|content| content.pid);
            return Err(StoreError::Locked {
                path: store_dir.to_path_buf(),
                pid,
            });
        }

        write_lock_content(&mut file).map_err(lock_err)?;

        Ok(Self {
            path: lock_path,
            file,
        })
    }

    /// Path of the lock file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

// The file itself is left in place on release. Unlinking it would let an
// opener racing with the release lock the orphaned inode.

/// Write lock content (PID + timestamp)
fn write_lock_content(file: &mut File) -> std::io::Result<()> {
    let content = LockContent {
        pid: std::process::id(),
        acquired_at: current_timestamp_ms(),
    };

    let serialized = serde_json::to_string(&content)?;

    file.set_len(0)?;
    file.seek(SeekFrom::Start(0))?;
    file.write_all(serialized.as_bytes())?;
    file.sync_all()?;
    Ok(())
}

/// Read lock content from file
fn read_lock_content(file: &mut File) -> std::io::Result<LockContent> {
    file.seek(SeekFrom::Start(0))?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Try to acquire exclusive file lock (non-blocking)
#[cfg(unix)]
fn try_flock_exclusive(file: &File) -> std::io::Result<bool> {
    use nix::fcntl::{flock, FlockArg};
    use std::os::unix::io::AsRawFd;

    match flock(file.as_raw_fd(), FlockArg::LockExclusiveNonblock) {
        Ok(()) => Ok(true),
        Err(nix::errno::Errno::EWOULDBLOCK) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// No advisory locking off unix; sled's own file lock still applies
#[cfg(not(unix))]
fn try_flock_exclusive(_file: &File) -> std::io::Result<bool> {
    Ok(true)
}

fn current_timestamp_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
