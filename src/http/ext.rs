//! URL extension resolution module
//!
//! Extracts the lower-cased file extension from a request url, ignoring
//! any query string. Pure string computation, no I/O.

/// Get the file extension from a url, or `None` if no extension is present.
///
/// Everything from the first `?` onward is stripped before processing, so
/// a query string never influences extension detection. Only the final
/// dot-segment of the final path segment counts, and a trailing dot yields
/// `Some("")`, which is distinct from the no-dot `None` outcome.
///
/// # Examples
/// ```
/// use rust_devserver::http::ext::resolve_extension;
/// assert_eq!(resolve_extension("a/b.TXT"), Some("txt".to_string()));
/// assert_eq!(resolve_extension("a/b.txt.zip"), Some("zip".to_string()));
/// assert_eq!(resolve_extension("a/b"), None);
/// ```
pub fn resolve_extension(url: &str) -> Option<String> {
    // Remove the query string, if there is one.
    let path = match url.find('?') {
        Some(pos) => &url[..pos],
        None => url,
    };

    let segment = path.rsplit('/').next().unwrap_or(path);
    let (_, extension) = segment.rsplit_once('.')?;
    Some(extension.to_ascii_lowercase())
}
