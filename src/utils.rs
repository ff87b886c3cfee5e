/// Utility functions used throughout the application

use std::path::PathBuf;

/// Get platform-specific debug log path
pub fn get_debug_log_path() -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push("imgtui-debug.log");
    path
}

/// Directory holding the persisted session database
pub fn get_data_dir() -> PathBuf {
    if let Some(cache_dir) = dirs::cache_dir() {
        cache_dir.join("imgtui")
    } else {
        let mut path = std::env::temp_dir();
        path.push("imgtui-cache");
        path
    }
}
