use crate::import::{ContentHandle, ImportOutcome, ImportState};
use std::path::PathBuf;
use tokio::sync::mpsc;

pub const STATUS_READY: &str = "Select an application package to import";
pub const STATUS_REUSE_AVAILABLE: &str =
    "Select an application package, or continue with the last imported one";
pub const STATUS_SELECTING: &str = "Waiting for a file to be selected...";
pub const STATUS_COPYING: &str = "Copying application...";
pub const STATUS_LAUNCHED: &str = "Application launched";
pub const NOTIFICATION_MISSING_ARTIFACT: &str =
    "The imported application could not be found. Please select it again.";

/// Snapshot of the interactive controls, published after every change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlView {
    pub state: ImportState,
    /// "Select new artifact" trigger
    pub select_enabled: bool,
    /// "Reuse last artifact" trigger
    pub reuse_available: bool,
    pub status: String,
    /// Blocking error notification; cleared by dismissing it
    pub notification: Option<String>,
}

impl ControlView {
    pub(crate) fn initial(reuse_available: bool) -> Self {
        Self {
            state: ImportState::Idle,
            select_enabled: true,
            reuse_available,
            status: idle_status(reuse_available).to_string(),
            notification: None,
        }
    }
}

pub(crate) fn idle_status(reuse_available: bool) -> &'static str {
    if reuse_available {
        STATUS_REUSE_AVAILABLE
    } else {
        STATUS_READY
    }
}

/// How an attempt settled, sent to subscribers once per attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptReport {
    Cancelled,
    Failed { reason: String },
    HandedOff { artifact: PathBuf },
    MissingArtifact { artifact: PathBuf },
    LaunchFailed { reason: String },
}

/// Events processed by the control task
pub(crate) enum ControlEvent {
    SelectRequested,
    ReuseRequested,
    DismissNotification,
    Subscribe(mpsc::UnboundedSender<AttemptReport>),
    SelectionAnswered(Option<ContentHandle>),
    PickerFailed(String),
    CopyFinished(ImportOutcome),
}
