//! External Services
//!
//! This module contains services that interact with external systems:
//! - api: Background worker executing backend requests
//! - files: Reading local files picked for upload
//! - preview: Downloading and decoding images for the preview popup

pub mod api;
pub mod files;
pub mod preview;

// Re-export commonly used types for convenience
pub use api::{ApiRequest, ApiResponse};
