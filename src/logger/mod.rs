//! Logger module
//!
//! Provides logging utilities for the dev server:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Error reporting (every 404 lands here as well as at the client)
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::Config;
use std::net::SocketAddr;

/// Initialize the logger with configuration.
///
/// Should be called once at application startup. Without it, all channels
/// fall back to stdout/stderr.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to info log
fn write_info(message: &str) {
    if writer::is_initialized() {
        writer::get().write_info(message);
    } else {
        println!("{message}");
    }
}

/// Write to error log
fn write_error(message: &str) {
    if writer::is_initialized() {
        writer::get().write_error(message);
    } else {
        eprintln!("{message}");
    }
}

/// Write to access log specifically
fn write_access(message: &str) {
    if writer::is_initialized() {
        writer::get().write_access(message);
    } else {
        println!("{message}");
    }
}

pub fn log_server_start(addr: &SocketAddr, root_dir: &str) {
    write_info("======================================");
    write_info("Dev server started successfully");
    write_info(&format!("{root_dir}/ -> http://{addr}/"));
    write_info("Zero-build mode: js/mjs imports are rewritten on the fly");
    write_info("======================================\n");
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_access(&entry.format(format));
}

/// Report a 404 diagnostic on the operator-visible error channel
pub fn log_not_found(message: &str) {
    write_error(&format!("[404] {message}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_browser_opened(url: &str) {
    write_info(&format!("Opened {url} in your default browser"));
}
