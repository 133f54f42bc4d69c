//! Security response headers.
//!
//! Pages load only the bundled stylesheet and script; note images may come
//! from anywhere over HTTPS.

use axum::http::HeaderValue;
use axum::http::header::HeaderName;
use tower_http::set_header::SetResponseHeaderLayer;

const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; \
                                       script-src 'self'; \
                                       style-src 'self' 'unsafe-inline'; \
                                       img-src 'self' data: https:; \
                                       connect-src 'self'; \
                                       frame-ancestors 'none'";

/// Set `name` on every response, replacing any handler value.
fn always(name: &'static str, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(
        HeaderName::from_static(name),
        HeaderValue::from_static(value),
    )
}

pub(crate) fn csp_layer() -> SetResponseHeaderLayer<HeaderValue> {
    always("content-security-policy", CONTENT_SECURITY_POLICY)
}

pub(crate) fn content_type_options_layer() -> SetResponseHeaderLayer<HeaderValue> {
    always("x-content-type-options", "nosniff")
}

pub(crate) fn frame_options_layer() -> SetResponseHeaderLayer<HeaderValue> {
    always("x-frame-options", "DENY")
}

pub(crate) fn referrer_policy_layer() -> SetResponseHeaderLayer<HeaderValue> {
    always("referrer-policy", "same-origin")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csp_allows_only_bundled_code() {
        assert!(CONTENT_SECURITY_POLICY.contains("script-src 'self';"));
        assert!(CONTENT_SECURITY_POLICY.contains("img-src 'self' data: https:"));
        assert!(CONTENT_SECURITY_POLICY.contains("frame-ancestors 'none'"));
    }
}
