// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;
use std::collections::HashMap;

/// Lookup table of module-specifier replacements.
///
/// Passed through unchanged to the import rewriter on every JavaScript
/// request; the request pipeline never inspects it.
pub type RewriteMap = HashMap<String, String>;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub rewrites: RewriteMap,
}

/// Server configuration
///
/// `root_dir` is resolved once at startup and never changes; all file
/// resolution is relative to it.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub root_dir: String,
    pub host: String,
    pub port: u16,
    pub open_browser: bool,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
    /// Access log format (combined, common, or json)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}
