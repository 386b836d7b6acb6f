//! Filesystem resolution module
//!
//! Maps normalized urls to on-disk paths, including the node-modules
//! proxy convention for JavaScript, and performs the actual reads.

use std::path::{Path, PathBuf};
use tokio::fs;

/// Marker that redirects a JavaScript url to the `node_modules` directory
/// one level above the serving root. The strip offset is derived from the
/// marker's own length.
pub const NODE_MODULES_PROXY_MARKER: &str = "__NODE_MODULES_PROXY__";

/// Resolve the on-disk location of a JavaScript url.
///
/// Urls containing [`NODE_MODULES_PROXY_MARKER`] resolve everything after
/// the marker against `<root_dir>/../node_modules/`; anything else resolves
/// beneath the serving root like a static file.
pub fn resolve_script_path(root_dir: &str, url: &str) -> PathBuf {
    match url.find(NODE_MODULES_PROXY_MARKER) {
        Some(pos) => {
            let rest = &url[pos + NODE_MODULES_PROXY_MARKER.len()..];
            Path::new(root_dir)
                .join("..")
                .join("node_modules")
                .join(rest.trim_start_matches('/'))
        }
        None => resolve_static_path(root_dir, url),
    }
}

/// Resolve the on-disk location of a non-proxied url beneath the root
pub fn resolve_static_path(root_dir: &str, url: &str) -> PathBuf {
    Path::new(root_dir).join(url.trim_start_matches('/'))
}

/// Read an entire JavaScript source file as text.
///
/// The whole file is needed in memory so the import rewriter can process
/// it; streaming is not an option on this branch.
pub async fn load_script(path: &Path) -> std::io::Result<String> {
    fs::read_to_string(path).await
}

/// Open a file for streamed delivery, returning the handle and its size
/// when known. The caller pipes the bytes to the response without
/// buffering.
pub async fn open_file(path: &Path) -> std::io::Result<(fs::File, Option<u64>)> {
    let file = fs::File::open(path).await?;
    let length = file.metadata().await.ok().map(|m| m.len());
    Ok((file, length))
}
