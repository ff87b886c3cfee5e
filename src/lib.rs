//! Image Manager TUI Library
//!
//! Exposes the client core (REST client, session, navigation model, content
//! loader) so the binary and the integration tests share one implementation.

use std::sync::atomic::{AtomicBool, Ordering};

pub mod api;
pub mod config;
pub mod logic;
pub mod model;
pub mod services;
pub mod session;
pub mod utils;

/// Global flag for debug mode (set from `--debug`)
pub static DEBUG_MODE: AtomicBool = AtomicBool::new(false);

/// Append a line to the debug log when debug mode is enabled
pub fn log_debug(msg: &str) {
    if !DEBUG_MODE.load(Ordering::Relaxed) {
        return;
    }

    use std::fs::OpenOptions;
    use std::io::Write;
    if let Ok(mut file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(utils::get_debug_log_path())
    {
        let _ = writeln!(file, "{}", msg);
    }
}
