//! Server state shared across handlers.

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::Client;

use super::config::ServerConfig;
use crate::catalog::{CatalogStore, Enhancer, HttpSource};
use crate::error::{AtlasError, Result};
use crate::recommend::{CategoryClassifier, Recommender};

/// Application state shared across handlers
pub struct AppState {
    /// Server configuration
    pub config: ServerConfig,
    /// Upstream listing, also used by the proxy routes
    pub upstream: HttpSource,
    /// Catalog snapshot store
    pub store: Arc<CatalogStore>,
    /// Needs-based recommender
    pub recommender: Recommender,
    /// Server start time
    pub start_time: Instant,
}

impl AppState {
    /// Create state whose store reads from the configured upstream
    pub fn new(config: ServerConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AtlasError::Network(format!("Failed to create HTTP client: {e}")))?;

        let upstream =
            HttpSource::with_client(client, config.models_url()).with_api_key(config.api_key.clone());

        let mut store =
            CatalogStore::new(upstream.clone()).with_enhancer(Enhancer::new(config.inference.clone()));
        if let Some(seed) = config.seed {
            store = store.with_seed(seed);
        }

        let recommender = Recommender::new(CategoryClassifier::new(config.keywords.clone()));

        Ok(Self {
            config,
            upstream,
            store: Arc::new(store),
            recommender,
            start_time: Instant::now(),
        })
    }

    /// Serve catalog routes from a different store
    pub fn with_store(mut self, store: Arc<CatalogStore>) -> Self {
        self.store = store;
        self
    }

    /// Get server uptime
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogOrigin, StaticSource};

    #[test]
    fn test_new_state_starts_on_fallback() {
        let state = AppState::new(ServerConfig::default()).unwrap();
        assert_eq!(state.store.source_name(), "http");
        assert_eq!(state.store.current().origin(), CatalogOrigin::Fallback);
        assert_eq!(state.upstream.url(), "https://openrouter.ai/api/v1/models");
    }

    #[test]
    fn test_with_store() {
        let store = Arc::new(CatalogStore::new(StaticSource::empty()));
        let state = AppState::new(ServerConfig::default())
            .unwrap()
            .with_store(Arc::clone(&store));
        assert_eq!(state.store.source_name(), "static");
    }
}
