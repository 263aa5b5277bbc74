//! Response header and body rewriting.
//!
//! # Responsibilities
//! - Defeat caching on every proxied response
//! - Open the response up for cross-origin consumption
//! - Rewrite `Location` headers and HTML bodies through the reverse table
//!
//! # Design Decisions
//! - One alternation pattern over all mapped upstream hosts, compiled per
//!   request because the hosts embed the request's own base domain
//! - A `Location` value that is not an absolute URL is passed through
//!   untouched; rewrite failures are never fatal
//! - `integrity` attributes are stripped wholesale: subresource hashes
//!   cannot survive a body rewrite

use axum::http::{header, HeaderMap, HeaderValue};
use regex::Regex;
use url::Url;

use crate::routing::DomainTable;

/// Force no-cache semantics and permissive CORS, and drop the headers that
/// would block rewritten cross-origin content or wipe client storage.
pub fn apply_proxy_headers(headers: &mut HeaderMap) {
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-store, no-cache, must-revalidate"),
    );
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(
        header::ACCESS_CONTROL_EXPOSE_HEADERS,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.remove(header::CONTENT_SECURITY_POLICY);
    headers.remove(header::CONTENT_SECURITY_POLICY_REPORT_ONLY);
    headers.remove("clear-site-data");
}

/// Rewrite an absolute `Location` header whose host is a mapped upstream.
///
/// Anything else, relative redirects included, is left exactly as the
/// upstream sent it.
pub fn rewrite_location(headers: &mut HeaderMap, table: &DomainTable) {
    let Some(location) = headers.get(header::LOCATION).and_then(|v| v.to_str().ok()) else {
        return;
    };
    let mut url = match Url::parse(location) {
        Ok(url) => url,
        Err(error) => {
            tracing::debug!(location = %location, error = %error, "location is not an absolute URL, passing through");
            return;
        }
    };
    let Some(mirror) = url
        .host_str()
        .and_then(|host| table.mirror_for(host))
        .map(str::to_string)
    else {
        return;
    };
    if !set_mirror_authority(&mut url, &mirror) {
        return;
    }
    if let Ok(value) = HeaderValue::try_from(url.to_string()) {
        headers.insert(header::LOCATION, value);
    }
}

/// Point a URL at a mirror host, carrying an embedded `:PORT` if present.
pub(crate) fn set_mirror_authority(url: &mut Url, mirror: &str) -> bool {
    let (host, port) = match mirror.rsplit_once(':') {
        Some((host, port)) => match port.parse::<u16>() {
            Ok(port) => (host, Some(port)),
            Err(_) => (mirror, None),
        },
        None => (mirror, None),
    };
    url.set_host(Some(host)).is_ok() && url.set_port(port).is_ok()
}

/// Rewrite every `https?://<upstream>` occurrence in an HTML body to its
/// mirror host, and strip `integrity="…"` attributes.
///
/// The per-match table lookup is the safety net: if the alternation ever
/// matches a host the table does not know, the match passes through
/// unchanged.
pub fn rewrite_html(body: &str, table: &DomainTable) -> Result<String, regex::Error> {
    let hosts = table
        .upstream_hosts()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("|");
    let url_pattern = Regex::new(&format!("(https?://)({hosts})"))?;
    let rewritten = url_pattern.replace_all(body, |caps: &regex::Captures<'_>| {
        match table.mirror_for(&caps[2]) {
            Some(mirror) => format!("{}{}", &caps[1], mirror),
            None => caps[0].to_string(),
        }
    });
    let integrity_pattern = Regex::new(r#"integrity="[^"]*""#)?;
    Ok(integrity_pattern.replace_all(&rewritten, "").into_owned())
}
