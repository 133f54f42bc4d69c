//! HTTP request handlers.

pub(crate) mod assets;
pub(crate) mod docs;
pub(crate) mod landing;

use axum::http::{HeaderMap, HeaderName, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use md5::{Digest, Md5};

/// Compute `ETag` from version and content.
///
/// MD5 truncated to 64 bits (16 hex chars).
pub(crate) fn compute_etag(version: &str, content: &str) -> String {
    let hash = Md5::digest(format!("{version}:{content}").as_bytes());
    format!("\"{}\"", &hex::encode(hash)[..16])
}

/// Whether the request's `If-None-Match` matches `etag`.
pub(crate) fn is_not_modified(headers: &HeaderMap, etag: &str) -> bool {
    headers
        .get(header::IF_NONE_MATCH)
        .is_some_and(|value| value.as_bytes() == etag.as_bytes())
}

/// Respond with a full HTML page, honoring conditional requests.
///
/// Only successful pages carry an `ETag`.
pub(crate) fn html_page(
    status: StatusCode,
    html: String,
    version: &str,
    headers: &HeaderMap,
    extra: Vec<(HeaderName, String)>,
) -> Response {
    if status != StatusCode::OK {
        return (status, Html(html)).into_response();
    }

    let etag = compute_etag(version, &html);
    if is_not_modified(headers, &etag) {
        return StatusCode::NOT_MODIFIED.into_response();
    }

    let mut response = (
        [
            (header::ETAG, etag),
            (header::CACHE_CONTROL, "no-cache".to_owned()),
        ],
        Html(html),
    )
        .into_response();
    for (name, value) in extra {
        if let Ok(value) = value.parse() {
            response.headers_mut().insert(name, value);
        }
    }
    response
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_compute_etag_includes_version() {
        assert_ne!(compute_etag("1.0.0", "content"), compute_etag("1.0.1", "content"));
    }

    #[test]
    fn test_compute_etag_includes_content() {
        assert_ne!(compute_etag("1.0.0", "content1"), compute_etag("1.0.0", "content2"));
    }

    #[test]
    fn test_compute_etag_format() {
        let etag = compute_etag("1.0.0", "content");

        assert!(etag.starts_with('"'));
        assert!(etag.ends_with('"'));
        assert_eq!(etag.len(), 18);
    }

    #[test]
    fn test_is_not_modified() {
        let etag = compute_etag("1", "x");
        let mut headers = HeaderMap::new();
        assert!(!is_not_modified(&headers, &etag));

        headers.insert(header::IF_NONE_MATCH, HeaderValue::from_str(&etag).unwrap());
        assert!(is_not_modified(&headers, &etag));

        headers.insert(header::IF_NONE_MATCH, HeaderValue::from_static("\"other\""));
        assert!(!is_not_modified(&headers, &etag));
    }

    #[test]
    fn test_html_page_error_status_has_no_etag() {
        let response = html_page(
            StatusCode::NOT_FOUND,
            "<p>missing</p>".to_owned(),
            "1",
            &HeaderMap::new(),
            Vec::new(),
        );

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().get(header::ETAG).is_none());
    }
}
