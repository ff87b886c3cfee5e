//! Local file access for uploads

use tokio::io::AsyncReadExt;

use crate::logic::upload::{
    expand_user_path, mime_from_path, sniff_mime, validate_upload, UploadFile,
    UploadValidationError,
};

/// Bytes read to sniff the format of files without a known extension
const SNIFF_LEN: usize = 64;

/// Read and validate a file picked for upload
///
/// Type and size are checked before the content is read, so an oversized
/// or non-image file is rejected without loading it.
pub async fn read_upload_file(raw_path: &str) -> Result<UploadFile, UploadValidationError> {
    if raw_path.trim().is_empty() {
        return Err(UploadValidationError::MissingFile);
    }
    let path = expand_user_path(raw_path);

    let metadata = tokio::fs::metadata(&path)
        .await
        .map_err(|e| UploadValidationError::Unreadable(e.to_string()))?;
    if !metadata.is_file() {
        return Err(UploadValidationError::Unreadable("not a regular file".to_string()));
    }
    let size = metadata.len();

    let mime = match mime_from_path(&path) {
        Some(mime) => Some(mime),
        None => {
            let mut file = tokio::fs::File::open(&path)
                .await
                .map_err(|e| UploadValidationError::Unreadable(e.to_string()))?;
            let mut header = vec![0u8; SNIFF_LEN];
            let n = file
                .read(&mut header)
                .await
                .map_err(|e| UploadValidationError::Unreadable(e.to_string()))?;
            header.truncate(n);
            sniff_mime(&header)
        }
    };
    let mime = mime.unwrap_or_else(|| "application/octet-stream".to_string());

    validate_upload(&mime, size)?;

    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| UploadValidationError::Unreadable(e.to_string()))?;

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image")
        .to_string();

    Ok(UploadFile {
        file_name,
        mime,
        bytes,
    })
}
