use crate::import::types::ContentHandle;
use std::path::PathBuf;
use tracing::{info, warn};

/// MIME type of Android application packages, the default picker filter
pub const PACKAGE_ARCHIVE_MIME: &str = "application/vnd.android.package-archive";

/// Source of content handles (allows swapping the native dialog out in tests).
///
/// Returns `None` when the user dismissed the picker.
#[async_trait::async_trait]
pub trait ArtifactPicker: Send + Sync {
    async fn request_selection(&self, mime_filter: &str) -> Option<ContentHandle>;
}

/// File extensions a native dialog should offer for a MIME filter.
/// An empty list means no filtering.
pub fn extensions_for_mime(mime_filter: &str) -> &'static [&'static str] {
    match mime_filter {
        PACKAGE_ARCHIVE_MIME => &["apk"],
        "application/zip" => &["zip"],
        "application/java-archive" => &["jar"],
        _ => &[],
    }
}

/// Picker that always answers with the same path (headless runs).
///
/// A path that cannot be opened is reported as a cancelled selection.
pub struct PathPicker {
    path: Option<PathBuf>,
}

impl PathPicker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Picker that always reports cancellation
    pub fn cancelled() -> Self {
        Self { path: None }
    }
}

#[async_trait::async_trait]
impl ArtifactPicker for PathPicker {
    async fn request_selection(&self, _mime_filter: &str) -> Option<ContentHandle> {
        let path = self.path.as_ref()?;
        match ContentHandle::open(path) {
            Ok(handle) => {
                info!("PathPicker: Selected {}", path.display());
                Some(handle)
            }
            Err(e) => {
                warn!("PathPicker: Cannot open {}: {}", path.display(), e);
                None
            }
        }
    }
}

/// Native file dialog picker
#[cfg(feature = "desktop")]
pub struct RfdPicker {
    title: String,
}

#[cfg(feature = "desktop")]
impl RfdPicker {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

#[cfg(feature = "desktop")]
#[async_trait::async_trait]
impl ArtifactPicker for RfdPicker {
    async fn request_selection(&self, mime_filter: &str) -> Option<ContentHandle> {
        let mut dialog = rfd::AsyncFileDialog::new().set_title(self.title.as_str());
        let extensions = extensions_for_mime(mime_filter);
        if !extensions.is_empty() {
            dialog = dialog.add_filter(mime_filter, extensions);
        }

        let file_handle = dialog.pick_file().await?;
        let path = file_handle.path().to_path_buf();
        match ContentHandle::open(&path) {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!("RfdPicker: Cannot open {}: {}", path.display(), e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::TempDir;

    #[test]
    fn test_package_archive_maps_to_apk() {
        assert_eq!(extensions_for_mime(PACKAGE_ARCHIVE_MIME), &["apk"]);
        assert!(extensions_for_mime("*/*").is_empty());
    }

    #[tokio::test]
    async fn test_path_picker_opens_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("game.apk");
        std::fs::write(&path, b"PK\x03\x04").unwrap();

        let handle = PathPicker::new(&path)
            .request_selection(PACKAGE_ARCHIVE_MIME)
            .await
            .unwrap();
        assert_eq!(handle.name(), "game.apk");

        let mut contents = Vec::new();
        handle.into_reader().read_to_end(&mut contents).unwrap();
        assert_eq!(contents, b"PK\x03\x04");
    }

    #[tokio::test]
    async fn test_missing_path_counts_as_cancelled() {
        let dir = TempDir::new().unwrap();
        let picker = PathPicker::new(dir.path().join("nope.apk"));
        assert!(picker.request_selection(PACKAGE_ARCHIVE_MIME).await.is_none());
        assert!(PathPicker::cancelled()
            .request_selection(PACKAGE_ARCHIVE_MIME)
            .await
            .is_none());
    }
}
