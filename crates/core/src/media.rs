//! Upload validation constants and helpers.
//!
//! Both images and videos share the same size cap; only the extension
//! whitelists differ. Validation runs before anything touches disk, so a
//! rejected upload never leaves an orphan file behind.

use crate::error::CoreError;

/// Maximum accepted upload size for any media file (50 MB).
pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Allowed image file extensions (lowercase, no dot).
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Allowed video file extensions (lowercase, no dot).
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "mkv"];

/// Extract the lowercase extension of a file name, without the dot.
pub fn file_extension(filename: &str) -> Option<String> {
    let ext = filename.rsplit_once('.')?.1;
    if ext.is_empty() {
        None
    } else {
        Some(ext.to_ascii_lowercase())
    }
}

/// Validate an image upload's file name and size.
pub fn validate_image_upload(filename: &str, size_bytes: usize) -> Result<(), CoreError> {
    validate_upload(filename, size_bytes, IMAGE_EXTENSIONS, "image")
}

/// Validate a video upload's file name and size.
pub fn validate_video_upload(filename: &str, size_bytes: usize) -> Result<(), CoreError> {
    validate_upload(filename, size_bytes, VIDEO_EXTENSIONS, "video")
}

fn validate_upload(
    filename: &str,
    size_bytes: usize,
    allowed: &[&str],
    kind: &str,
) -> Result<(), CoreError> {
    if size_bytes > MAX_UPLOAD_BYTES {
        return Err(CoreError::Validation(format!(
            "The {kind} file is too large. The maximum allowed size is {} MB.",
            MAX_UPLOAD_BYTES / (1024 * 1024)
        )));
    }

    match file_extension(filename) {
        Some(ext) if allowed.contains(&ext.as_str()) => Ok(()),
        _ => Err(CoreError::Validation(format!(
            "Unsupported {kind} format. Allowed extensions: {}",
            allowed.join(", ")
        ))),
    }
}
