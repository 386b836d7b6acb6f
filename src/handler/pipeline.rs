//! Request pipeline module
//!
//! Turns one incoming HTTP request into exactly one response: normalize
//! the url, resolve the extension, classify it, then either
//! buffer-and-rewrite (JavaScript) or stream straight from disk. The
//! first failing step determines the outcome; every failure converges on
//! a uniform plain-text 404.

use crate::config::AppState;
use crate::handler::static_files;
use crate::http::response::{self, ResponseBody};
use crate::http::{ext, mime};
use crate::logger;
use crate::logger::AccessLogEntry;
use hyper::{Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) -> Result<Response<ResponseBody>, Infallible> {
    let method = req.method().to_string();
    let http_version = format!("{:?}", req.version());
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(ToString::to_string);
    let referer = header_value(&req, "referer");
    let user_agent = header_value(&req, "user-agent");

    let response = serve(&path, &state).await;

    if state.config.logging.access_log {
        let entry = AccessLogEntry {
            remote_addr: peer_addr.to_string(),
            time: chrono::Local::now(),
            method,
            path,
            query,
            http_version,
            status: response.status().as_u16(),
            body_bytes: content_length(&response),
            referer,
            user_agent,
        };
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Resolve one request path into a response.
///
/// Steps run strictly in order: normalize, resolve the extension,
/// classify it, then deliver. No retries, no backtracking; headers and
/// method are never consulted.
pub async fn serve(path: &str, state: &AppState) -> Response<ResponseBody> {
    // Proxy '/' to '/index.html', and '/sub/dir/' to '/sub/dir/index.html'.
    let url = if path.ends_with('/') {
        format!("{path}index.html")
    } else {
        path.to_owned()
    };

    let Some(extension) = ext::resolve_extension(&url) else {
        return respond_404(&format!("url '{url}' has no extension"));
    };

    let Some(content_type) = mime::classify(&extension) else {
        return respond_404(&format!("extension '{extension}' is not recognised"));
    };

    if matches!(extension.as_str(), "js" | "mjs") {
        serve_script(&url, content_type, state).await
    } else {
        serve_static(&url, content_type, state).await
    }
}

/// Transforming delivery: buffer the source, rewrite imports, respond
async fn serve_script(url: &str, content_type: &str, state: &AppState) -> Response<ResponseBody> {
    let path = static_files::resolve_script_path(state.root_dir(), url);

    let source = match static_files::load_script(&path).await {
        Ok(source) => source,
        Err(_) => return respond_404("Not Found"),
    };

    let rewritten = state.rewriter.rewrite(&source, state.rewrites());
    let length = rewritten.len() as u64;
    response::build_content_response(response::full_body(rewritten), content_type, Some(length))
}

/// Streaming delivery: open the file and pipe its bytes to the response
async fn serve_static(url: &str, content_type: &str, state: &AppState) -> Response<ResponseBody> {
    let path = static_files::resolve_static_path(state.root_dir(), url);

    match static_files::open_file(&path).await {
        Ok((file, length)) => {
            response::build_content_response(response::stream_body(file), content_type, length)
        }
        Err(_) => respond_404("Not Found"),
    }
}

/// Uniform 404: plain-text diagnostic to the client, same message on the
/// error log channel.
fn respond_404(message: &str) -> Response<ResponseBody> {
    logger::log_not_found(message);
    response::build_404_response(message)
}

fn header_value(req: &Request<hyper::body::Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn content_length(response: &Response<ResponseBody>) -> u64 {
    response
        .headers()
        .get("Content-Length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, LoggingConfig, RewriteMap, ServerConfig};
    use crate::rewrite::ImportRewriter;
    use http_body_util::BodyExt;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    /// Rewriter stub that records every invocation
    struct RecordingRewriter {
        calls: Arc<AtomicUsize>,
        seen: Arc<Mutex<Vec<(String, RewriteMap)>>>,
    }

    impl ImportRewriter for RecordingRewriter {
        fn rewrite(&self, source: &str, rewrites: &RewriteMap) -> String {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen
                .lock()
                .unwrap()
                .push((source.to_string(), rewrites.clone()));
            format!("/* rewritten */\n{source}")
        }
    }

    type Seen = Arc<Mutex<Vec<(String, RewriteMap)>>>;

    fn test_state(root_dir: &str, rewrites: RewriteMap) -> (AppState, Arc<AtomicUsize>, Seen) {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen: Seen = Arc::new(Mutex::new(Vec::new()));
        let rewriter = RecordingRewriter {
            calls: Arc::clone(&calls),
            seen: Arc::clone(&seen),
        };
        let config = Config {
            server: ServerConfig {
                root_dir: root_dir.to_string(),
                host: "127.0.0.1".to_string(),
                port: 4321,
                open_browser: false,
                workers: None,
            },
            logging: LoggingConfig {
                access_log: false,
                access_log_format: "combined".to_string(),
                access_log_file: None,
                error_log_file: None,
            },
            rewrites,
        };
        (AppState::new(config, Box::new(rewriter)), calls, seen)
    }

    async fn body_bytes(response: Response<ResponseBody>) -> Vec<u8> {
        response
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes()
            .to_vec()
    }

    #[tokio::test]
    async fn test_root_serves_index_html() {
        let root = TempDir::new().unwrap();
        std::fs::write(root.path().join("index.html"), "<h1>hello</h1>").unwrap();
        let (state, calls, _) = test_state(root.path().to_str().unwrap(), RewriteMap::new());

        let response = serve("/", &state).await;

        assert_eq!(response.status(), 200);
        assert_eq!(response.headers().get("Content-Type").unwrap(), "text/html");
        assert_eq!(body_bytes(response).await, b"<h1>hello</h1>");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_subdirectory_trailing_slash_serves_index() {
        let root = TempDir::new().unwrap();
        std::fs::create_dir(root.path().join("sub")).unwrap();
        std::fs::write(root.path().join("sub/index.html"), "sub page").unwrap();
        let (state, _, _) = test_state(root.path().to_str().unwrap(), RewriteMap::new());

        let response = serve("/sub/", &state).await;

        assert_eq!(response.status(), 200);
        assert_eq!(body_bytes(response).await, b"sub page");
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let root = TempDir::new().unwrap();
        let (state, _, _) = test_state(root.path().to_str().unwrap(), RewriteMap::new());

        let response = serve("/missing.png", &state).await;

        assert_eq!(response.status(), 404);
        assert_eq!(
            response.headers().get("Content-Type").unwrap(),
            "text/plain"
        );
        assert_eq!(body_bytes(response).await, b"Not Found");
    }

    #[tokio::test]
    async fn test_css_streams_without_rewrite() {
        let root = TempDir::new().unwrap();
        std::fs::write(root.path().join("app.css"), "body { margin: 0 }").unwrap();
        let (state, calls, _) = test_state(root.path().to_str().unwrap(), RewriteMap::new());

        let response = serve("/app.css", &state).await;

        assert_eq!(response.status(), 200);
        assert_eq!(response.headers().get("Content-Type").unwrap(), "text/css");
        assert_eq!(body_bytes(response).await, b"body { margin: 0 }");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_js_is_rewritten_exactly_once() {
        let root = TempDir::new().unwrap();
        let source = "import x from 'pkg';\n";
        std::fs::write(root.path().join("app.js"), source).unwrap();
        let rewrites: RewriteMap = [("pkg".to_string(), "./vendor/pkg.js".to_string())]
            .into_iter()
            .collect();
        let (state, calls, seen) = test_state(root.path().to_str().unwrap(), rewrites.clone());

        let response = serve("/app.js", &state).await;

        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers().get("Content-Type").unwrap(),
            "application/javascript"
        );
        assert_eq!(
            body_bytes(response).await,
            format!("/* rewritten */\n{source}").into_bytes()
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let invocations = seen.lock().unwrap();
        assert_eq!(invocations.len(), 1);
        assert_eq!(invocations[0].0, source);
        assert_eq!(invocations[0].1, rewrites);
    }

    #[tokio::test]
    async fn test_mjs_uses_transforming_delivery() {
        let root = TempDir::new().unwrap();
        std::fs::write(root.path().join("mod.mjs"), "export const a = 1;\n").unwrap();
        let (state, calls, _) = test_state(root.path().to_str().unwrap(), RewriteMap::new());

        let response = serve("/mod.mjs", &state).await;

        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers().get("Content-Type").unwrap(),
            "application/javascript"
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_script_is_not_found() {
        let root = TempDir::new().unwrap();
        let (state, calls, _) = test_state(root.path().to_str().unwrap(), RewriteMap::new());

        let response = serve("/nope.js", &state).await;

        assert_eq!(response.status(), 404);
        assert_eq!(body_bytes(response).await, b"Not Found");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_node_modules_proxy_resolves_beside_root() {
        let base = TempDir::new().unwrap();
        let root = base.path().join("www");
        std::fs::create_dir(&root).unwrap();
        std::fs::create_dir(base.path().join("node_modules")).unwrap();
        std::fs::write(
            base.path().join("node_modules/baz.js"),
            "export default 1;\n",
        )
        .unwrap();
        let (state, calls, _) = test_state(root.to_str().unwrap(), RewriteMap::new());

        let response = serve("/__NODE_MODULES_PROXY__/baz.js", &state).await;

        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers().get("Content-Type").unwrap(),
            "application/javascript"
        );
        assert_eq!(
            body_bytes(response).await,
            b"/* rewritten */\nexport default 1;\n"
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_extensionless_url_is_404() {
        let (state, _, _) = test_state("src", RewriteMap::new());

        let response = serve("/readme", &state).await;

        assert_eq!(response.status(), 404);
        assert_eq!(
            response.headers().get("Content-Type").unwrap(),
            "text/plain"
        );
        assert_eq!(body_bytes(response).await, b"url '/readme' has no extension");
    }

    #[tokio::test]
    async fn test_unrecognised_extension_is_404() {
        let (state, _, _) = test_state("src", RewriteMap::new());

        let response = serve("/archive.zip", &state).await;

        assert_eq!(response.status(), 404);
        assert_eq!(
            body_bytes(response).await,
            b"extension 'zip' is not recognised"
        );
    }
}
