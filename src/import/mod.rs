// # Import Module
//
// Selection and copy of a package artifact into private storage:
//
// - **ArtifactPicker**: asks the user for a file, answers with a ContentHandle or cancellation
// - **Copier**: chunked blocking copy into a staging file, renamed over the destination
// - **Importer**: single-attempt guard plus copy on the blocking pool
//
// The control service (crate::control) drives these and makes the hand-off decision.

mod copier;
mod importer;
mod picker;
mod types;

pub use copier::{copy_into, staging_path};
pub use importer::{ImportTask, Importer};
#[cfg(feature = "desktop")]
pub use picker::RfdPicker;
pub use picker::{extensions_for_mime, ArtifactPicker, PathPicker, PACKAGE_ARCHIVE_MIME};
pub use types::{ContentHandle, ImportError, ImportOutcome, ImportState};
