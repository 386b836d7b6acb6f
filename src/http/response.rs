//! HTTP response building module
//!
//! Provides the boxed body type that unifies buffered and streamed
//! delivery, plus builders for the responses the pipeline produces.

use futures::TryStreamExt;
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Full, StreamBody};
use hyper::body::{Bytes, Frame};
use hyper::Response;
use tokio_util::io::ReaderStream;

/// Response body: either a fully buffered payload or a byte stream read
/// straight from an open file.
pub type ResponseBody = BoxBody<Bytes, std::io::Error>;

/// Body holding an in-memory payload
pub fn full_body(data: impl Into<Bytes>) -> ResponseBody {
    Full::new(data.into())
        .map_err(|never| match never {})
        .boxed()
}

/// Body that streams a file's bytes without buffering the whole file.
///
/// Dropping the body (client disconnect, connection error) drops the
/// underlying file handle.
pub fn stream_body(file: tokio::fs::File) -> ResponseBody {
    StreamBody::new(ReaderStream::new(file).map_ok(Frame::data)).boxed()
}

/// Build 404 Not Found response with a plain-text diagnostic message
pub fn build_404_response(message: &str) -> Response<ResponseBody> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .header("Content-Length", message.len())
        .body(full_body(message.to_owned()))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(full_body("Not Found"))
        })
}

/// Build 200 response carrying classified content
pub fn build_content_response(
    body: ResponseBody,
    content_type: &str,
    content_length: Option<u64>,
) -> Response<ResponseBody> {
    let mut builder = Response::builder()
        .status(200)
        .header("Content-Type", content_type);

    if let Some(length) = content_length {
        builder = builder.header("Content-Length", length);
    }

    builder.body(body).unwrap_or_else(|e| {
        log_build_error("200", &e);
        Response::new(full_body(Bytes::new()))
    })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_404_response_shape() {
        let response = build_404_response("url '/readme' has no extension");
        assert_eq!(response.status(), 404);
        assert_eq!(
            response.headers().get("Content-Type").unwrap(),
            "text/plain"
        );
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"url '/readme' has no extension");
    }

    #[tokio::test]
    async fn test_content_response_sets_type_and_length() {
        let response = build_content_response(full_body("body"), "text/css", Some(4));
        assert_eq!(response.status(), 200);
        assert_eq!(response.headers().get("Content-Type").unwrap(), "text/css");
        assert_eq!(response.headers().get("Content-Length").unwrap(), "4");
    }
}
