//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → shared via Arc with the server
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the mirror tables are derived from
//!   request hosts, not config, so there is nothing to hot-reload
//! - All fields have defaults so the proxy runs with no file at all
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{BuildConfig, ListenerConfig, ProxyConfig, TimeoutConfig, UpstreamConfig};
