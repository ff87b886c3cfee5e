//! Upload validation
//!
//! Client-side checks on a file before it is sent to the backend. The
//! backend remains authoritative; these only catch obvious mistakes early.

use std::path::Path;

/// Largest accepted upload: 10 MiB
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// A validated file ready for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadValidationError {
    #[error("Please select an image file")]
    MissingFile,
    #[error("Please select a valid image file")]
    NotAnImage,
    #[error("File size should be less than 10MB")]
    TooLarge { size: u64 },
    #[error("Cannot read file: {0}")]
    Unreadable(String),
}

/// Check MIME type and size of a candidate upload
///
/// # Examples
/// ```
/// use imgtui::logic::upload::{validate_upload, UploadValidationError, MAX_UPLOAD_BYTES};
///
/// assert!(validate_upload("image/png", 1024).is_ok());
/// assert!(validate_upload("image/jpeg", MAX_UPLOAD_BYTES).is_ok());
/// assert_eq!(
///     validate_upload("image/png", MAX_UPLOAD_BYTES + 1),
///     Err(UploadValidationError::TooLarge { size: MAX_UPLOAD_BYTES + 1 })
/// );
/// assert_eq!(validate_upload("text/plain", 10), Err(UploadValidationError::NotAnImage));
/// ```
pub fn validate_upload(mime: &str, size: u64) -> Result<(), UploadValidationError> {
    if !mime.to_ascii_lowercase().starts_with("image/") {
        return Err(UploadValidationError::NotAnImage);
    }

    if size > MAX_UPLOAD_BYTES {
        return Err(UploadValidationError::TooLarge { size });
    }

    Ok(())
}

/// MIME type implied by the file extension, if it names an image format
pub fn mime_from_path(path: &Path) -> Option<String> {
    image::ImageFormat::from_path(path)
        .ok()
        .map(|format| format.to_mime_type().to_string())
}

/// MIME type sniffed from the leading bytes of a file
pub fn sniff_mime(header: &[u8]) -> Option<String> {
    image::guess_format(header)
        .ok()
        .map(|format| format.to_mime_type().to_string())
}

/// Default image name: the file name without its last extension
///
/// # Examples
/// ```
/// use imgtui::logic::upload::default_image_name;
///
/// assert_eq!(default_image_name("beach.jpg"), "beach");
/// assert_eq!(default_image_name("beach.day.1.png"), "beach.day.1");
/// assert_eq!(default_image_name("README"), "README");
/// ```
pub fn default_image_name(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => file_name.to_string(),
    }
}

/// Expand a leading `~/` to the home directory
pub fn expand_user_path(raw: &str) -> std::path::PathBuf {
    let raw = raw.trim();
    if let Some(rest) = raw.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    std::path::PathBuf::from(raw)
}
