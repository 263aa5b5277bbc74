//! Upstream proxy pipeline.
//!
//! # Data Flow
//! ```text
//! Dispatched request + DomainTable
//!     → engine.rs (stage 1: release-redirect probe, stage 2: general proxy)
//!     → request.rs (build the outbound request)
//!     → upstream fetch (hyper client, redirects never followed)
//!     → rewrite.rs (headers scrubbed, Location and HTML bodies rewritten)
//!     → Response to client
//! ```
//!
//! # Design Decisions
//! - The table pair travels through the call chain as a value; no shared
//!   mutable state between requests
//! - Failures surface as a single error type rendered into a 500 body; no
//!   retries, requests are independent and stateless

pub mod engine;
pub mod request;
pub mod rewrite;

use axum::body::Body;
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use thiserror::Error;

/// Shared upstream HTTP client. Built once at startup, cloned per request.
pub type HttpClient = Client<HttpsConnector<HttpConnector>, Body>;

/// Errors that can occur while proxying a request upstream.
///
/// Every variant is terminal for the request that hit it and is reported to
/// the client as a 500 whose body is the error's display text.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Network or protocol failure talking to the upstream.
    #[error("upstream request failed: {0}")]
    Upstream(#[from] hyper_util::client::legacy::Error),

    /// Upstream body could not be read for rewriting.
    #[error("failed to read upstream body: {0}")]
    Body(#[from] axum::Error),

    /// Target authority or URI could not be assembled.
    #[error("invalid upstream uri: {0}")]
    Uri(#[from] axum::http::uri::InvalidUri),

    /// Target URI parts did not combine into a valid URI.
    #[error("invalid upstream uri: {0}")]
    UriParts(#[from] axum::http::uri::InvalidUriParts),

    /// The host-alternation rewrite pattern failed to compile.
    #[error("invalid rewrite pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Outbound request or response could not be constructed.
    #[error("failed to assemble message: {0}")]
    Http(#[from] axum::http::Error),
}
