//! Mirror ↔ upstream host mapping.
//!
//! # Responsibilities
//! - Synthesize the mirror hostnames (`<label>.<base>`) for a base domain
//! - Resolve a request host to its upstream GitHub host
//! - Resolve an upstream host back to its mirror host for response rewriting
//!
//! # Design Decisions
//! - The label set is fixed and closed; any other subdomain is unmapped
//! - Both directions are built together so they cannot drift apart
//! - Tables are small and rebuilt per request; the base domain comes from
//!   the request itself, so one deployment serves any number of domains

use std::collections::HashMap;

/// Canonical GitHub web host, the only upstream with redirect special-casing.
pub const GITHUB_HOST: &str = "github.com";

/// The closed set of mirror labels and the upstream host each one fronts.
const LABEL_UPSTREAMS: [(&str, &str); 7] = [
    ("release", GITHUB_HOST),
    ("assets", "github.githubassets.com"),
    ("raw", "raw.githubusercontent.com"),
    ("download", "codeload.github.com"),
    ("objects", "objects.githubusercontent.com"),
    ("media", "media.githubusercontent.com"),
    ("gist", "gist.github.com"),
];

/// Bidirectional mapping between mirror hosts and upstream hosts for one
/// base domain.
///
/// Keys on the forward side carry whatever the base domain carries, port
/// included, so `release.localhost:8080` round-trips intact.
#[derive(Debug, Clone)]
pub struct DomainTable {
    forward: HashMap<String, &'static str>,
    reverse: HashMap<&'static str, String>,
}

impl DomainTable {
    /// Build both directions for the given base domain.
    pub fn for_base(base: &str) -> Self {
        let mut forward = HashMap::with_capacity(LABEL_UPSTREAMS.len());
        let mut reverse = HashMap::with_capacity(LABEL_UPSTREAMS.len());
        for (label, upstream) in LABEL_UPSTREAMS {
            let mirror = format!("{label}.{base}");
            forward.insert(mirror.clone(), upstream);
            reverse.insert(upstream, mirror);
        }
        Self { forward, reverse }
    }

    /// Upstream host for a request host, if the host is a mirror host.
    pub fn upstream_for(&self, host: &str) -> Option<&'static str> {
        self.forward.get(host).copied()
    }

    /// Mirror host for an upstream host, if the upstream is mapped.
    pub fn mirror_for(&self, upstream: &str) -> Option<&str> {
        self.reverse.get(upstream).map(String::as_str)
    }

    /// All mapped upstream hosts, for building the body-rewrite pattern.
    pub fn upstream_hosts(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.reverse.keys().copied()
    }
}
