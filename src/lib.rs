//! Zero-build local development server.
//!
//! Serves files from a configured root directory over plain HTTP/1.1,
//! classifying them by extension. JavaScript sources are buffered and run
//! through an import-specifier rewriter so package-manager style module
//! paths work in a browser without a bundling step; everything else is
//! streamed straight from disk.

pub mod browser;
pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod rewrite;
pub mod server;
