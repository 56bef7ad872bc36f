//! # Congress API Server
//!
//! HTTP proxy in front of the ProPublica Congress API, reshaping responses
//! as JSON:API documents for the single-page client.
//!
//! ## Endpoints
//!
//! - `GET /health` - Liveness and cache statistics
//! - `GET /congress/v1/legislation` - Upcoming bills of both chambers
//! - `GET /congress/v1/legislation/:bill_slug` - A single bill (`hr4249-115`)
//! - `GET /congress/v1/legislation/:bill_slug/representatives` - Bill cosponsors
//! - `GET /congress/v1/congress/:congress_id/legislation/:bill_slug/statements` - Bill statements
//!
//! Every other path is served from the configured public directory.
//!
//! ## Example
//!
//! ```rust,ignore
//! use congress_api::{ApiServer, ServerConfig};
//!
//! let config = ServerConfig::from_file("config.json")?;
//! let server = ApiServer::new(config)?;
//! server.run(([0, 0, 0, 0], 8080)).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod config;
mod dto;
mod error;
mod handlers;
mod routes;
mod state;

pub use config::{parse_ttl, ServerConfig};
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::Method;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use congress_core::error::Result;

/// API server for the Congress proxy.
pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    /// Creates a new API server backed by the ProPublica API.
    pub fn new(config: ServerConfig) -> Result<Self> {
        Ok(Self::with_state(AppState::new(config)?))
    }

    /// Creates a server around prepared state.
    pub fn with_state(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    /// Creates the router with all routes and middleware configured.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET])
            .allow_headers(Any);

        create_router(self.state.clone())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Runs the server on the given address.
    pub async fn run(self, addr: impl Into<SocketAddr>) -> std::io::Result<()> {
        let addr = addr.into();
        let listener = tokio::net::TcpListener::bind(addr).await?;

        info!(
            %addr,
            cache_ttl_seconds = self.state.fetcher.cache_ttl().as_secs(),
            "Congress API server listening"
        );

        axum::serve(listener, self.router()).await
    }
}
