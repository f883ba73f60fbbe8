//! Stored-media management.
//!
//! [`MediaStore`] owns the media root directory. Uploaded files are
//! written under per-entity subdirectories with UUID file names (the
//! original name only contributes its extension). Deletion is strictly
//! best-effort: row state is authoritative, storage cleanup follows it,
//! and a failed file delete is logged and never propagated -- it must
//! not block or fail the row mutation that triggered it.

use std::path::{Path, PathBuf};

use edifica_core::error::CoreError;
use edifica_core::media::file_extension;
use uuid::Uuid;

/// Subdirectory for project gallery images.
pub const SUBDIR_PROJECT_IMAGES: &str = "projects/images";
/// Subdirectory for project videos.
pub const SUBDIR_PROJECT_VIDEOS: &str = "projects/videos";
/// Subdirectory for client logos.
pub const SUBDIR_CLIENT_LOGOS: &str = "company/clients";
/// Subdirectory for service icons.
pub const SUBDIR_SERVICE_ICONS: &str = "company/services";
/// Subdirectory for the about-us image.
pub const SUBDIR_ABOUT: &str = "company/about";

/// Filesystem-backed store for uploaded media.
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    /// Create a store rooted at `root`. The directory is created lazily
    /// on first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The store's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of a stored file.
    pub fn absolute(&self, rel_path: &str) -> PathBuf {
        self.root.join(rel_path)
    }

    /// Public URL of a stored file (served under `/media`).
    pub fn url(&self, rel_path: &str) -> String {
        format!("/media/{rel_path}")
    }

    /// Persist an upload under `subdir`, returning the relative path of
    /// the stored file.
    ///
    /// The stored name is a fresh UUID carrying the upload's extension,
    /// so concurrent uploads of identically-named files never collide.
    pub async fn save(
        &self,
        subdir: &str,
        original_filename: &str,
        data: &[u8],
    ) -> Result<String, CoreError> {
        let ext = file_extension(original_filename).ok_or_else(|| {
            CoreError::Validation(format!(
                "File name '{original_filename}' has no extension"
            ))
        })?;

        let rel_path = format!("{subdir}/{}.{ext}", Uuid::new_v4());
        let abs_path = self.absolute(&rel_path);

        if let Some(parent) = abs_path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                CoreError::Internal(format!("Failed to create media directory: {e}"))
            })?;
        }

        tokio::fs::write(&abs_path, data)
            .await
            .map_err(|e| CoreError::Internal(format!("Failed to store uploaded file: {e}")))?;

        tracing::debug!(path = %rel_path, bytes = data.len(), "Stored media file");
        Ok(rel_path)
    }

    /// Best-effort delete of a stored file.
    ///
    /// A missing file is not an error (the row is the source of truth;
    /// storage may already have been cleaned). Any other failure is
    /// logged at WARN and swallowed.
    pub async fn delete(&self, rel_path: &str) {
        let abs_path = self.absolute(rel_path);
        match tokio::fs::remove_file(&abs_path).await {
            Ok(()) => {
                tracing::debug!(path = %rel_path, "Deleted media file");
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %rel_path, "Media file already absent");
            }
            Err(e) => {
                tracing::warn!(path = %rel_path, error = %e, "Failed to delete media file");
            }
        }
    }

    /// Best-effort delete of a batch of stored files, used after a
    /// cascading row deletion.
    pub async fn delete_all(&self, rel_paths: &[String]) {
        for path in rel_paths {
            self.delete(path).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_writes_uuid_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = MediaStore::new(dir.path());

        let rel = store
            .save(SUBDIR_PROJECT_IMAGES, "façade.JPG", b"not-really-a-jpg")
            .await
            .unwrap();

        assert!(rel.starts_with("projects/images/"));
        assert!(rel.ends_with(".jpg"));
        assert!(store.absolute(&rel).exists());
    }

    #[tokio::test]
    async fn save_without_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = MediaStore::new(dir.path());

        let err = store
            .save(SUBDIR_PROJECT_IMAGES, "noext", b"data")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no extension"));
    }

    #[tokio::test]
    async fn delete_removes_file_and_tolerates_absence() {
        let dir = tempfile::tempdir().unwrap();
        let store = MediaStore::new(dir.path());

        let rel = store
            .save(SUBDIR_CLIENT_LOGOS, "logo.png", b"png-bytes")
            .await
            .unwrap();
        store.delete(&rel).await;
        assert!(!store.absolute(&rel).exists());

        // Deleting again must be a quiet no-op.
        store.delete(&rel).await;
    }

    #[test]
    fn url_is_served_under_media() {
        let store = MediaStore::new("/tmp/media");
        assert_eq!(
            store.url("projects/images/abc.jpg"),
            "/media/projects/images/abc.jpg"
        );
    }
}
