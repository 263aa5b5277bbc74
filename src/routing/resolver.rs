//! Request authority splitting.

/// The two halves of a request authority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostParts {
    /// Leading label when the authority has one, empty otherwise.
    pub subdomain: String,
    /// Everything after the leading label, port included.
    pub domain: String,
}

impl HostParts {
    /// Render the authority the way the client sent it, for diagnostics.
    pub fn display(&self) -> String {
        if self.subdomain.is_empty() {
            self.domain.clone()
        } else {
            format!("{}.{}", self.subdomain, self.domain)
        }
    }
}

/// Split a request authority into (subdomain, base domain).
///
/// Three or more dot-separated labels: the first label is the subdomain and
/// the rest form the base domain. Exactly two labels: the first is only
/// treated as a subdomain when the second is `localhost` (optionally with a
/// port), which keeps `label.localhost:PORT` working for local testing.
/// A single label is the base domain on its own.
pub fn split_host(host: &str) -> HostParts {
    let labels: Vec<&str> = host.split('.').collect();
    match labels.len() {
        0 | 1 => HostParts {
            subdomain: String::new(),
            domain: host.to_string(),
        },
        2 => {
            if is_localhost(labels[1]) {
                HostParts {
                    subdomain: labels[0].to_string(),
                    domain: labels[1].to_string(),
                }
            } else {
                HostParts {
                    subdomain: String::new(),
                    domain: host.to_string(),
                }
            }
        }
        _ => HostParts {
            subdomain: labels[0].to_string(),
            domain: labels[1..].join("."),
        },
    }
}

/// `localhost`, optionally followed by `:PORT`.
fn is_localhost(label: &str) -> bool {
    match label.strip_prefix("localhost") {
        Some("") => true,
        Some(rest) => rest
            .strip_prefix(':')
            .is_some_and(|port| !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit())),
        None => false,
    }
}
