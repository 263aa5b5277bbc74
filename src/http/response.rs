//! Fixed responses served without touching any upstream.

use axum::{
    body::Body,
    http::{header, HeaderValue, Response, StatusCode},
};

use crate::proxy::ProxyError;
use crate::routing::HostParts;

/// Header carrying the deployment's build identifier on diagnostics.
pub const GIT_HASH_HEADER: &str = "git-hash";

/// Empty 204 for noise paths (favicon probes, service-worker lookups).
pub fn no_content() -> Response<Body> {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::NO_CONTENT;
    response
}

/// Disallow-all robots policy; mirrored content should not be indexed.
pub fn robots_txt() -> Response<Body> {
    plain_text(StatusCode::OK, "User-agent: *\nDisallow: /".to_string())
}

/// Plaintext diagnostic for hosts outside the mirror table.
///
/// Deliberately a 200: an unmapped host is an operator or DNS mistake, not a
/// client error, and the body names exactly what was asked for.
pub fn unsupported_domain(host: &HostParts, git_hash: &str) -> Response<Body> {
    let mut response = plain_text(
        StatusCode::OK,
        format!("Unsupported domain {}", host.display()),
    );
    if let Ok(value) = HeaderValue::from_str(git_hash) {
        response.headers_mut().insert(GIT_HASH_HEADER, value);
    }
    response
}

/// Terminal failure in the proxy pipeline, reported with the error text.
pub fn internal_error(error: &ProxyError) -> Response<Body> {
    let mut response = Response::new(Body::from(error.to_string()));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response
}

fn plain_text(status: StatusCode, body: String) -> Response<Body> {
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain;charset=utf-8"),
    );
    response
}
