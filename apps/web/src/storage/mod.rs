//! Flat-file CSV storage for credentials and generated records.
//!
//! Every operation takes an in-process mutex and an advisory `fs2` lock on a
//! sibling `.lock` file, so read-check-write sequences stay atomic across
//! request handlers and across processes sharing the same data directory.
//! Operations are blocking; async callers go through [`run_blocking`].

pub mod credentials;
pub mod records;

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use fs2::FileExt;
use thiserror::Error;

use crate::errors::AppError;

pub use credentials::CredentialStore;
pub use records::RecordStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Lock error on {path}: {message}")]
    Lock { path: PathBuf, message: String },
}

/// A CSV file plus the in-process guard serializing access to it.
#[derive(Debug)]
struct GuardedFile {
    path: PathBuf,
    guard: Mutex<()>,
}

/// Held for the duration of one store operation.
struct Exclusive<'a> {
    _guard: MutexGuard<'a, ()>,
    _lock: FileLock,
}

impl GuardedFile {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            guard: Mutex::new(()),
        }
    }

    fn exclusive(&self) -> Result<Exclusive<'_>, StoreError> {
        // A panic while holding the guard leaves no in-memory state behind.
        let guard = self.guard.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let lock = FileLock::acquire(&self.path)?;
        Ok(Exclusive {
            _guard: guard,
            _lock: lock,
        })
    }

    /// True when the table exists and already has at least a header row.
    fn has_content(&self) -> bool {
        fs::metadata(&self.path)
            .map(|meta| meta.len() > 0)
            .unwrap_or(false)
    }
}

/// Advisory exclusive lock on `<file>.lock`. Released when dropped.
struct FileLock {
    file: File,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self, StoreError> {
        let lock_path = lock_path_for(path);

        if let Some(parent) = lock_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        file.lock_exclusive().map_err(|e| StoreError::Lock {
            path: lock_path.clone(),
            message: e.to_string(),
        })?;

        Ok(FileLock { file })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // The lock file itself stays; removing it would let a waiter and a
        // newcomer lock different inodes.
        let _ = FileExt::unlock(&self.file);
    }
}

fn lock_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".lock");
    path.with_file_name(name)
}

/// Runs a blocking store operation on tokio's blocking pool.
pub async fn run_blocking<T, F>(op: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(op)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("storage task failed: {e}")))?
        .map_err(AppError::from)
}
