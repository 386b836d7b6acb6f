// Application state module
// Immutable per-process state shared by every request

use super::types::{Config, RewriteMap};
use crate::rewrite::ImportRewriter;

/// Application state handed to the request pipeline.
///
/// Constructed once at startup and never mutated afterwards, so concurrent
/// requests share it behind an `Arc` with no locking discipline.
pub struct AppState {
    pub config: Config,
    pub rewriter: Box<dyn ImportRewriter>,
}

impl AppState {
    pub fn new(config: Config, rewriter: Box<dyn ImportRewriter>) -> Self {
        Self { config, rewriter }
    }

    /// Serving root all non-proxied file resolution is relative to
    pub fn root_dir(&self) -> &str {
        &self.config.server.root_dir
    }

    /// Specifier replacements handed to the rewriter on every JS request
    pub fn rewrites(&self) -> &RewriteMap {
        &self.config.rewrites
    }
}
