//! Formatting and display logic
//!
//! Pure functions for formatting data for human-readable display.

use chrono::{DateTime, Local};

/// Format a byte count in megabytes with two decimals
///
/// # Examples
/// ```
/// use imgtui::logic::formatting::format_size_mb;
///
/// assert_eq!(format_size_mb(0), "0.00 MB");
/// assert_eq!(format_size_mb(1024 * 1024), "1.00 MB");
/// assert_eq!(format_size_mb(1536 * 1024), "1.50 MB");
/// ```
pub fn format_size_mb(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}

/// Format an RFC 3339 timestamp as a local calendar date ("2025-03-01")
///
/// Unparseable input yields an empty string.
pub fn format_date(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(dt) => dt.with_timezone(&Local).format("%Y-%m-%d").to_string(),
        Err(_) => String::new(),
    }
}

/// Join breadcrumb names into a path ("Home / Vacation / Beach")
pub fn format_breadcrumb_path<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    names.into_iter().collect::<Vec<_>>().join(" / ")
}

/// Mask a secret for display
pub fn mask(value: &str) -> String {
    "•".repeat(value.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_mb_rounding() {
        assert_eq!(format_size_mb(10 * 1024 * 1024), "10.00 MB");
        assert_eq!(format_size_mb(5_000), "0.00 MB");
        assert_eq!(format_size_mb(123_456_789), "117.74 MB");
    }

    #[test]
    fn test_format_date_invalid_is_empty() {
        assert_eq!(format_date(""), "");
        assert_eq!(format_date("yesterday"), "");
    }

    #[test]
    fn test_format_date_valid() {
        // Local timezone may shift the day by one
        let formatted = format_date("2025-03-01T12:00:00.000Z");
        assert!(formatted == "2025-03-01" || formatted == "2025-03-02", "{}", formatted);
    }

    #[test]
    fn test_breadcrumb_path() {
        assert_eq!(format_breadcrumb_path(["Home"]), "Home");
        assert_eq!(format_breadcrumb_path(["Home", "Vacation"]), "Home / Vacation");
    }

    #[test]
    fn test_mask_counts_chars() {
        assert_eq!(mask("pässword"), "••••••••");
        assert_eq!(mask(""), "");
    }
}
