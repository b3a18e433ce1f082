//! Model Atlas HTTP server.
//!
//! Provides an HTTP API over the catalog:
//! - Upstream listing proxy with fallback (`/api/models`)
//! - Browsing and search (`/api/catalog`, `/api/categories`)
//! - Needs-based recommendations (`/api/recommend`)
//!
//! # Example
//!
//! ```rust,ignore
//! use atlas::server::{serve, ServerConfig};
//!
//! let config = ServerConfig::default().with_port(8080);
//! serve(config).await?;
//! ```

mod config;
mod handlers;
mod state;

use std::sync::Arc;

pub use config::ServerConfig;
pub use handlers::{create_router, health_check, CatalogQuery, HealthResponse, RecommendRequest};
pub use state::AppState;

use crate::error::{AtlasError, Result};

/// Load the catalog, start background refresh and serve until shutdown
pub async fn serve(config: ServerConfig) -> Result<()> {
    let addr = config.addr;
    let refresh = config.refresh_interval;
    let state = Arc::new(AppState::new(config)?);

    let snapshot = state.store.load().await;
    tracing::info!(
        origin = ?snapshot.origin(),
        count = snapshot.len(),
        "initial catalog loaded"
    );

    let refresher = refresh.map(|period| {
        tracing::info!(secs = period.as_secs(), "catalog auto-refresh enabled");
        Arc::clone(&state.store).spawn_auto_refresh(period)
    });

    let app = create_router(Arc::clone(&state));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| AtlasError::Server(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Model Atlas listening on {addr}");
    tracing::info!("Upstream: {}", state.upstream.url());

    let result = axum::serve(listener, app)
        .await
        .map_err(|e| AtlasError::Server(e.to_string()));

    if let Some(handle) = refresher {
        handle.abort();
    }

    result
}
