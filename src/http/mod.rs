//! HTTP protocol layer module
//!
//! Pure request-classification helpers and response builders, decoupled
//! from filesystem and network concerns.

pub mod ext;
pub mod mime;
pub mod response;

// Re-export commonly used items
pub use ext::resolve_extension;
pub use mime::classify;
pub use response::{build_404_response, build_content_response, ResponseBody};
