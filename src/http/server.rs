//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum router with the catch-all dispatch handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Build the shared upstream HTTPS client
//! - Filter noise paths and serve the fixed responses
//! - Route mapped mirror hosts into the proxy pipeline
//! - Answer unmapped hosts with the plaintext diagnostic

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, Response},
    routing::any,
    Router,
};
use hyper_util::{client::legacy::Client, rt::TokioExecutor};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ProxyConfig;
use crate::http::request::{RequestIdLayer, X_REQUEST_ID};
use crate::http::response;
use crate::proxy::{engine, HttpClient};
use crate::routing::{resolver, DomainTable};

/// Application state injected into the dispatch handler.
#[derive(Clone)]
pub struct AppState {
    pub client: HttpClient,
    pub config: Arc<ProxyConfig>,
}

/// HTTP server for the mirror proxy.
pub struct HttpServer {
    router: Router,
    config: Arc<ProxyConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Self {
        let https = hyper_rustls::HttpsConnectorBuilder::new()
            .with_webpki_roots()
            .https_or_http()
            .enable_http1()
            .build();
        let client: HttpClient = Client::builder(TokioExecutor::new()).build(https);

        let config = Arc::new(config);
        let state = AppState {
            client,
            config: config.clone(),
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(dispatch))
            .route("/", any(dispatch))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until ctrl-c or the shutdown channel fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {
                        tracing::info!("shutdown signal received");
                    }
                    _ = shutdown.recv() => {
                        tracing::info!("shutdown triggered");
                    }
                }
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}

/// Single entry point for every inbound request.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response<Body> {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let path = request.uri().path();
    if path.contains("/favicon.") || path.contains("/sw.js") {
        return response::no_content();
    }
    if path == "/robots.txt" {
        return response::robots_txt();
    }

    let host = request
        .uri()
        .authority()
        .map(|a| a.as_str().to_string())
        .or_else(|| {
            request
                .headers()
                .get(header::HOST)
                .and_then(|h| h.to_str().ok())
                .map(str::to_string)
        })
        .unwrap_or_default()
        .to_ascii_lowercase();

    let parts = resolver::split_host(&host);
    let table = DomainTable::for_base(&parts.domain);

    match table.upstream_for(&host) {
        Some(upstream) => {
            tracing::debug!(
                request_id = %request_id,
                host = %host,
                upstream = %upstream,
                method = %request.method(),
                path = %request.uri().path(),
                "proxying request"
            );
            match engine::proxy(&state.client, &state.config.upstream, &table, upstream, request)
                .await
            {
                Ok(response) => response,
                Err(error) => {
                    tracing::error!(request_id = %request_id, host = %host, error = %error, "proxy pipeline failed");
                    response::internal_error(&error)
                }
            }
        }
        None => {
            tracing::debug!(request_id = %request_id, host = %host, "host not in mirror table");
            let git_hash = state.config.build.git_hash.as_deref().unwrap_or("unknown");
            response::unsupported_domain(&parts, git_hash)
        }
    }
}
