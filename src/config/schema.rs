//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML config files.
//! Every section has defaults so the proxy runs with no config file at all.

use serde::{Deserialize, Serialize};

/// Root configuration for the mirror proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream fetch configuration.
    pub upstream: UpstreamConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Build identity reported on diagnostic responses.
    pub build: BuildConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream fetch configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Contact upstreams over HTTPS. Disable only for local testing.
    pub https: bool,

    /// Send all upstream traffic to this fixed authority instead of the
    /// mapped host (the mapped host still travels in the `host` header).
    /// Meant for pointing the proxy at a local mock or relay.
    pub authority_override: Option<String>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            https: true,
            authority_override: None,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Time budget for producing a response head, in seconds. Body
    /// streaming is not bounded by this.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Build identity configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Git hash of the deployed build, surfaced in the `git-hash` header on
    /// diagnostic responses. Falls back to the `GIT_HASH` environment
    /// variable injected by the deployment.
    pub git_hash: Option<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            git_hash: std::env::var("GIT_HASH").ok(),
        }
    }
}
