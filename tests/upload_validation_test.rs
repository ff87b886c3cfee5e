//! Integration tests for local upload validation
//!
//! Type and size are checked before any request is built: a rejected file
//! never reaches the API service.

use std::path::PathBuf;

use imgtui::logic::upload::{validate_upload, UploadValidationError, MAX_UPLOAD_BYTES};
use imgtui::services::files::read_upload_file;

/// Create a sparse file of `size` bytes under the temp directory
fn temp_file(name: &str, size: u64) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("imgtui-upload-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    let path = dir.join(name);
    let file = std::fs::File::create(&path).expect("create temp file");
    file.set_len(size).expect("size temp file");
    path
}

#[test]
fn test_non_image_rejected_at_any_size() {
    for size in [0, 1, 1024, MAX_UPLOAD_BYTES, MAX_UPLOAD_BYTES + 1, 50 * 1024 * 1024] {
        assert_eq!(
            validate_upload("text/plain", size),
            Err(UploadValidationError::NotAnImage),
            "size {}",
            size
        );
    }
}

#[test]
fn test_size_boundary() {
    assert_eq!(validate_upload("image/png", MAX_UPLOAD_BYTES), Ok(()));
    assert_eq!(
        validate_upload("image/png", MAX_UPLOAD_BYTES + 1),
        Err(UploadValidationError::TooLarge {
            size: MAX_UPLOAD_BYTES + 1
        })
    );
}

#[tokio::test]
async fn test_read_upload_file_accepts_exact_limit() {
    let path = temp_file("exact.png", MAX_UPLOAD_BYTES);

    let file = read_upload_file(path.to_str().expect("utf-8 path"))
        .await
        .expect("10 MiB image is accepted");

    assert_eq!(file.file_name, "exact.png");
    assert_eq!(file.mime, "image/png");
    assert_eq!(file.bytes.len() as u64, MAX_UPLOAD_BYTES);
    let _ = std::fs::remove_file(path);
}

#[tokio::test]
async fn test_read_upload_file_rejects_one_byte_over() {
    let path = temp_file("over.jpg", MAX_UPLOAD_BYTES + 1);

    let err = read_upload_file(path.to_str().expect("utf-8 path"))
        .await
        .expect_err("10 MiB + 1 is rejected");

    assert_eq!(err.to_string(), "File size should be less than 10MB");
    let _ = std::fs::remove_file(path);
}

#[tokio::test]
async fn test_read_upload_file_rejects_text() {
    let path = temp_file("notes.txt", 12);

    let err = read_upload_file(path.to_str().expect("utf-8 path"))
        .await
        .expect_err("text file is rejected");

    assert_eq!(err, UploadValidationError::NotAnImage);
    assert_eq!(err.to_string(), "Please select a valid image file");
    let _ = std::fs::remove_file(path);
}

#[tokio::test]
async fn test_read_upload_file_sniffs_unknown_extension() {
    let dir = std::env::temp_dir().join(format!("imgtui-upload-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    let path = dir.join("photo.upload");
    // PNG signature followed by padding
    let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.extend_from_slice(&[0u8; 32]);
    std::fs::write(&path, &bytes).expect("write temp file");

    let file = read_upload_file(path.to_str().expect("utf-8 path"))
        .await
        .expect("sniffed as PNG");

    assert_eq!(file.mime, "image/png");
    let _ = std::fs::remove_file(path);
}

#[tokio::test]
async fn test_read_upload_file_missing() {
    assert_eq!(read_upload_file("   ").await, Err(UploadValidationError::MissingFile));

    let err = read_upload_file("/definitely/not/here.png")
        .await
        .expect_err("missing file");
    assert!(matches!(err, UploadValidationError::Unreadable(_)));
}
