use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("An import is already in progress")]
    Busy,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Copy worker error: {0}")]
    Worker(String),
}

/// Single-use readable stream handed over by a picker.
///
/// The importer takes it by value; the underlying stream is closed when the
/// handle is dropped, which happens exactly once at the end of the copy.
pub struct ContentHandle {
    name: String,
    reader: Box<dyn Read + Send>,
}

impl ContentHandle {
    pub fn new(name: impl Into<String>, reader: impl Read + Send + 'static) -> Self {
        Self {
            name: name.into(),
            reader: Box::new(reader),
        }
    }

    /// Open a file on disk as a content handle
    pub fn open(path: &Path) -> Result<Self, ImportError> {
        let file = File::open(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, file))
    }

    /// Display name of the selected content (file name when known)
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn into_reader(self) -> Box<dyn Read + Send> {
        self.reader
    }
}

impl fmt::Debug for ContentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentHandle")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Terminal result of one import attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    Success { artifact: PathBuf, bytes: u64 },
    Cancelled,
    Failure { reason: String },
}

impl ImportOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ImportOutcome::Success { .. })
    }
}

/// Importer state as seen by the control task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportState {
    #[default]
    Idle,
    Copying,
    Done,
    Failed,
}
