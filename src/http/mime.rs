//! MIME type classification module
//!
//! Maps a lower-cased file extension to its Content-Type, or `None` when
//! the extension is not recognised. A fixed table, no I/O.

/// Get the MIME Content-Type for a file extension.
///
/// The lookup is case-sensitive over an already-lower-cased input; callers
/// lower-case first. An unknown extension yields `None`, not an error, and
/// there is no fallback content type.
///
/// # Examples
/// ```
/// use rust_devserver::http::mime::classify;
/// assert_eq!(classify("html"), Some("text/html"));
/// assert_eq!(classify("mjs"), Some("application/javascript"));
/// assert_eq!(classify("xyz"), None);
/// ```
pub fn classify(extension: &str) -> Option<&'static str> {
    match extension {
        // Text
        "htm" | "html" => Some("text/html"),
        "css" => Some("text/css"),
        "txt" => Some("text/plain"),
        "xml" => Some("text/xml"),

        // JavaScript/WASM
        "js" | "mjs" => Some("application/javascript"),
        "json" => Some("application/json"),
        "wasm" => Some("application/wasm"),
        "webmanifest" => Some("application/manifest+json"),

        // Images
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "svg" => Some("image/svg+xml"),
        "ico" => Some("image/x-icon"),

        // Fonts
        "woff" => Some("application/font-woff"),
        "woff2" => Some("application/font-woff2"),
        "ttf" => Some("application/x-font-ttf"),
        "otf" => Some("application/x-font-opentype"),

        _ => None,
    }
}
