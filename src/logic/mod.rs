//! Business Logic
//!
//! This module contains pure business logic functions that can be unit tested:
//! - errors: Error classification and user-facing messages
//! - forms: Form field validation
//! - formatting: Sizes, dates and breadcrumb paths for display
//! - selection: List selection movement
//! - upload: Upload file validation (MIME type, size limit)

pub mod errors;
pub mod formatting;
pub mod forms;
pub mod selection;
pub mod upload;
