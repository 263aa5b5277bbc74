//! Outbound request construction.
//!
//! # Responsibilities
//! - Build the target URI from the upstream host and the original path/query
//! - Carry the original method, body and headers to the upstream
//! - Force the proxy marker header and cache-defeating headers
//!
//! # Design Decisions
//! - The target authority is the bare upstream host, so any non-default
//!   inbound port collapses to the scheme default
//! - `host`, `connection` and `transfer-encoding` are owned by the client
//!   connection and never copied; `accept-encoding` is dropped so HTML
//!   arrives uncompressed and can be rewritten
//! - The hyper client never follows redirects, so `Location` responses
//!   always come back to the rewriting layer

use axum::{
    body::Body,
    http::{
        header,
        uri::{Authority, PathAndQuery, Scheme},
        HeaderValue, Request, Uri,
    },
};
use std::str::FromStr;

use crate::config::UpstreamConfig;
use crate::proxy::ProxyError;

/// Marker header identifying traffic that went through this proxy.
pub const MARKER_HEADER: &str = "x-mirror-via";
const MARKER_VALUE: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Headers never copied from the inbound request.
const STRIPPED_REQUEST_HEADERS: [&str; 4] =
    ["host", "connection", "transfer-encoding", "accept-encoding"];

/// Build the URI the upstream fetch goes to.
///
/// The authority override, when configured, redirects the fetch to a fixed
/// next hop (a local mock or relay); the upstream host still travels in the
/// `host` header.
pub fn target_uri(
    upstream: &'static str,
    config: &UpstreamConfig,
    original: &Uri,
) -> Result<Uri, ProxyError> {
    let mut parts = axum::http::uri::Parts::default();
    parts.scheme = Some(if config.https { Scheme::HTTPS } else { Scheme::HTTP });
    let authority = config.authority_override.as_deref().unwrap_or(upstream);
    parts.authority = Some(Authority::from_str(authority)?);
    parts.path_and_query = Some(
        original
            .path_and_query()
            .cloned()
            .unwrap_or_else(|| PathAndQuery::from_static("/")),
    );
    Ok(Uri::from_parts(parts)?)
}

/// Assemble the outbound request for the general proxy path.
pub fn build_upstream_request(
    target: Uri,
    upstream: &'static str,
    parts: &axum::http::request::Parts,
    body: Body,
) -> Result<Request<Body>, ProxyError> {
    let mut outbound = Request::builder()
        .method(parts.method.clone())
        .uri(target)
        .body(body)?;

    let headers = outbound.headers_mut();
    for (name, value) in parts.headers.iter() {
        if STRIPPED_REQUEST_HEADERS.contains(&name.as_str()) {
            continue;
        }
        headers.insert(name.clone(), value.clone());
    }
    headers.insert(header::HOST, HeaderValue::from_static(upstream));
    headers.insert(MARKER_HEADER, HeaderValue::from_static(MARKER_VALUE));
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-cache, no-store, must-revalidate"),
    );
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(header::EXPIRES, HeaderValue::from_static("0"));

    Ok(outbound)
}
