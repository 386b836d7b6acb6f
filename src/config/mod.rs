// Configuration module entry point
// Loads the immutable startup configuration and owns the shared state type

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{Config, LoggingConfig, RewriteMap, ServerConfig};

impl Config {
    /// Load configuration from "config.toml" in the working directory,
    /// falling back to built-in defaults when the file is absent.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from the specified file path (without extension)
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("DEVSERVER"))
            .set_default("server.root_dir", "src")?
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 4321)?
            .set_default("server.open_browser", false)?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
