//! Semantic configuration checks.
//!
//! Serde handles the syntactic layer; this module checks value ranges and
//! address formats, and reports every violation rather than only the first.

use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use axum::http::uri::Authority;

use crate::config::schema::ProxyConfig;

/// A single semantic violation found in a config.
#[derive(Debug)]
pub enum ValidationError {
    /// Listener bind address does not parse as a socket address.
    InvalidBindAddress(String),
    /// Upstream authority override does not parse as an authority.
    InvalidAuthorityOverride(String),
    /// A timeout that must be positive is zero.
    ZeroTimeout(&'static str),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidBindAddress(addr) => {
                write!(f, "listener.bind_address '{addr}' is not a socket address")
            }
            ValidationError::InvalidAuthorityOverride(authority) => {
                write!(
                    f,
                    "upstream.authority_override '{authority}' is not a valid authority"
                )
            }
            ValidationError::ZeroTimeout(name) => {
                write!(f, "timeouts.{name} must be greater than zero")
            }
        }
    }
}

/// Validate a deserialized config, collecting all violations.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }
    if let Some(authority) = &config.upstream.authority_override {
        if Authority::from_str(authority).is_err() {
            errors.push(ValidationError::InvalidAuthorityOverride(authority.clone()));
        }
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("request_secs"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
