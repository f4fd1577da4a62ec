// # Importer
//
// Owns the destination artifact path and runs one copy at a time on the
// blocking pool. A second start while a copy is in flight is refused.

use crate::import::copier;
use crate::import::types::{ContentHandle, ImportError, ImportOutcome};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Copies content handles into a fixed destination artifact
#[derive(Clone)]
pub struct Importer {
    destination: PathBuf,
    in_flight: Arc<AtomicBool>,
}

/// Releases the single-attempt slot when the copy worker finishes, even on panic
struct AttemptGuard {
    in_flight: Arc<AtomicBool>,
}

impl Drop for AttemptGuard {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
    }
}

/// A running copy; resolves to the attempt's outcome
pub struct ImportTask {
    task: JoinHandle<ImportOutcome>,
}

impl ImportTask {
    pub async fn outcome(self) -> ImportOutcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(e) => {
                let err = ImportError::Worker(e.to_string());
                error!("Importer: {}", err);
                ImportOutcome::Failure {
                    reason: err.to_string(),
                }
            }
        }
    }
}

impl Importer {
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        Self {
            destination: destination.into(),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Whether a copy currently holds the destination
    pub fn is_copying(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Whether a previously imported artifact is on disk
    pub fn artifact_exists(&self) -> bool {
        self.destination.is_file()
    }

    /// Start copying `handle` into the destination on the blocking pool.
    ///
    /// Must be called from within a tokio runtime. Returns `ImportError::Busy`
    /// without touching `handle`'s stream if another copy is in flight; the
    /// handle is dropped (closed) in that case.
    pub fn start(&self, handle: ContentHandle) -> Result<ImportTask, ImportError> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ImportError::Busy)?;

        let guard = AttemptGuard {
            in_flight: self.in_flight.clone(),
        };
        let destination = self.destination.clone();

        let task = tokio::task::spawn_blocking(move || {
            let _guard = guard;
            run_copy(handle, &destination)
        });

        Ok(ImportTask { task })
    }
}

fn run_copy(handle: ContentHandle, destination: &Path) -> ImportOutcome {
    let source_name = handle.name().to_string();
    info!(
        "Importer: Copying {} to {}",
        source_name,
        destination.display()
    );

    let mut reader = handle.into_reader();
    let result = copier::copy_into(&mut *reader, destination);
    drop(reader);

    match result {
        Ok(bytes) => {
            info!("Importer: Copied {} bytes from {}", bytes, source_name);
            ImportOutcome::Success {
                artifact: destination.to_path_buf(),
                bytes,
            }
        }
        Err(e) => {
            let err = ImportError::Io(e);
            error!("Importer: Copy of {} failed: {}", source_name, err);
            ImportOutcome::Failure {
                reason: err.to_string(),
            }
        }
    }
}
