//! The proxy pipeline, as a two-stage state machine.
//!
//! # Stages
//! ```text
//! Stage 1 — release-redirect probe
//!     only for github.com paths containing /releases/download/
//!     GET with Accept: application/octet-stream, redirects not followed
//!     302 + mapped Location  → terminal: rewritten 302, no body fetched
//!     anything else          → fall through
//!
//! Stage 2 — general proxy
//!     forward the transformed request
//!     scrub headers, rewrite Location, rewrite HTML bodies
//!     terminal: rewritten response, or error surfaced as 500 upstairs
//! ```
//!
//! # Design Decisions
//! - Release binaries redirect to short-lived signed CDN URLs; only that one
//!   well-known redirect shape is intercepted before the body transfer
//! - Non-HTML bodies stream through untouched; HTML is buffered whole
//!   because the substitution needs the full text

use axum::{
    body::Body,
    http::{header, HeaderValue, Method, Request, Response, StatusCode, Uri},
};
use url::Url;

use crate::config::UpstreamConfig;
use crate::proxy::{request, rewrite, HttpClient, ProxyError};
use crate::routing::{table::GITHUB_HOST, DomainTable};

/// Path marker for GitHub release asset downloads.
const RELEASE_DOWNLOAD_MARKER: &str = "/releases/download/";

/// Outcome of the stage-1 probe.
enum ProbeOutcome {
    /// The upstream answered with a mapped redirect; terminal.
    Redirect(Response<Body>),
    /// Not a redirect we rewrite; continue with the general path.
    FallThrough,
}

/// Proxy one request to its upstream host and rewrite the response.
pub async fn proxy(
    client: &HttpClient,
    config: &UpstreamConfig,
    table: &DomainTable,
    upstream: &'static str,
    request: Request<Body>,
) -> Result<Response<Body>, ProxyError> {
    if upstream == GITHUB_HOST && request.uri().path().contains(RELEASE_DOWNLOAD_MARKER) {
        if let ProbeOutcome::Redirect(response) =
            probe_release_redirect(client, config, table, upstream, request.uri()).await?
        {
            return Ok(response);
        }
    }
    forward(client, config, table, upstream, request).await
}

/// Stage 1: ask GitHub where the release asset lives, and if the answer is a
/// 302 onto a mapped CDN host, hand the client the mirrored redirect without
/// ever fetching the asset body.
async fn probe_release_redirect(
    client: &HttpClient,
    config: &UpstreamConfig,
    table: &DomainTable,
    upstream: &'static str,
    original: &Uri,
) -> Result<ProbeOutcome, ProxyError> {
    let target = request::target_uri(upstream, config, original)?;
    let probe = Request::builder()
        .method(Method::GET)
        .uri(target)
        .header(header::HOST, HeaderValue::from_static(upstream))
        .header(header::ACCEPT, "application/octet-stream")
        .header(header::CACHE_CONTROL, "no-cache")
        .header(header::PRAGMA, "no-cache")
        .body(Body::empty())?;

    let response = client.request(probe).await?;
    if response.status() != StatusCode::FOUND {
        return Ok(ProbeOutcome::FallThrough);
    }
    let Some(location) = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
    else {
        return Ok(ProbeOutcome::FallThrough);
    };
    let Ok(mut url) = Url::parse(location) else {
        return Ok(ProbeOutcome::FallThrough);
    };
    let Some(mirror) = url
        .host_str()
        .and_then(|host| table.mirror_for(host))
        .map(str::to_string)
    else {
        return Ok(ProbeOutcome::FallThrough);
    };
    if !rewrite::set_mirror_authority(&mut url, &mirror) {
        return Ok(ProbeOutcome::FallThrough);
    }

    tracing::debug!(location = %url, "release download redirect rewritten");
    let redirect = Response::builder()
        .status(StatusCode::FOUND)
        .header(header::LOCATION, url.to_string())
        .header(
            header::CACHE_CONTROL,
            "no-store, no-cache, must-revalidate",
        )
        .header(header::PRAGMA, "no-cache")
        .body(Body::empty())?;
    Ok(ProbeOutcome::Redirect(redirect))
}

/// Stage 2: forward the transformed request and rewrite the response.
async fn forward(
    client: &HttpClient,
    config: &UpstreamConfig,
    table: &DomainTable,
    upstream: &'static str,
    request: Request<Body>,
) -> Result<Response<Body>, ProxyError> {
    let (parts, body) = request.into_parts();
    let target = request::target_uri(upstream, config, &parts.uri)?;
    let outbound = request::build_upstream_request(target, upstream, &parts, body)?;

    let response = client.request(outbound).await?;
    let (mut parts, incoming) = response.into_parts();

    rewrite::apply_proxy_headers(&mut parts.headers);
    rewrite::rewrite_location(&mut parts.headers, table);

    let is_html = parts
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("text/html"));
    if !is_html {
        return Ok(Response::from_parts(parts, Body::new(incoming)));
    }

    let bytes = axum::body::to_bytes(Body::new(incoming), usize::MAX).await?;
    let text = String::from_utf8_lossy(&bytes);
    let rewritten = rewrite::rewrite_html(&text, table)?;
    // Length changed; let hyper recompute the framing.
    parts.headers.remove(header::CONTENT_LENGTH);
    Ok(Response::from_parts(parts, Body::from(rewritten)))
}
