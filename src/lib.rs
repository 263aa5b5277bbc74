//! Subdomain-based GitHub mirror reverse proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                MIRROR PROXY                   │
//!                    │                                               │
//!   Client Request   │  ┌─────────┐   ┌──────────┐   ┌───────────┐  │
//!   ─────────────────┼─▶│  http   │──▶│ routing  │──▶│  proxy    │  │
//!                    │  │ server  │   │ resolver │   │  engine   │  │
//!                    │  └─────────┘   │ + table  │   └─────┬─────┘  │
//!                    │                └──────────┘         │        │
//!                    │                                     ▼        │
//!   Client Response  │  ┌──────────┐   ┌──────────┐  ┌───────────┐  │
//!   ◀────────────────┼──│ response │◀──│ rewrite  │◀─│  upstream │◀─┼── GitHub
//!                    │  │          │   │          │  │  client   │  │
//!                    │  └──────────┘   └──────────┘  └───────────┘  │
//!                    │                                               │
//!                    │  cross-cutting: config, lifecycle, tracing    │
//!                    └──────────────────────────────────────────────┘
//! ```
//!
//! Requests arrive on `<label>.<base-domain>` hosts; the label picks the
//! GitHub upstream, responses are rewritten so upstream hostnames never
//! leak, and caching is defeated end to end.

// Core subsystems
pub mod config;
pub mod http;
pub mod proxy;
pub mod routing;

// Cross-cutting concerns
pub mod lifecycle;

pub use config::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
