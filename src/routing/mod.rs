//! Host-based routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (host header / authority)
//!     → resolver.rs (split into base domain + subdomain label)
//!     → table.rs (build mirror↔upstream maps for the base domain)
//!     → Return: upstream host for mapped mirror hosts, or no match
//! ```
//!
//! # Design Decisions
//! - Tables are plain values rebuilt per request and passed down the call
//!   chain; nothing lives in process-wide state
//! - The proxy path matches on exact membership of the full request host in
//!   the forward table; the resolver split feeds table construction and the
//!   unmapped-host diagnostic
//! - No regex in the hot path (string splitting only)

pub mod resolver;
pub mod table;

pub use resolver::HostParts;
pub use table::DomainTable;
