//! Browser auto-open module
//!
//! Spawns the platform opener for the served index page when the
//! `open_browser` option is set. Failure to open a browser never affects
//! the server.

use crate::logger;
use std::process::Command;

/// Open `http://<host>:<port>/index.html` in the default browser
pub fn open(host: &str, port: u16) {
    let url = format!("http://{host}:{port}/index.html");

    // 'start' is a cmd.exe builtin, not an executable.
    let result = if cfg!(target_os = "windows") {
        Command::new("cmd").args(["/C", "start", &url]).spawn()
    } else if cfg!(target_os = "macos") {
        Command::new("open").arg(&url).spawn()
    } else {
        Command::new("xdg-open").arg(&url).spawn()
    };

    match result {
        Ok(_) => logger::log_browser_opened(&url),
        Err(e) => logger::log_warning(&format!("Failed to open browser for {url}: {e}")),
    }
}
