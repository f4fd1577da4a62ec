// # Control Module
//
// Caller side of the import pipeline: the two triggers, the status line, the
// error notification and the hand-off decision, all owned by one control task.
//
// Public API:
// - `ControlService`: start the control task
// - `ControlHandle`: trigger actions, read snapshots, subscribe to attempt reports

mod handle;
mod service;
mod types;

pub use handle::ControlHandle;
pub use service::ControlService;
pub use types::{
    AttemptReport, ControlView, NOTIFICATION_MISSING_ARTIFACT, STATUS_COPYING, STATUS_LAUNCHED,
    STATUS_READY, STATUS_REUSE_AVAILABLE, STATUS_SELECTING,
};
