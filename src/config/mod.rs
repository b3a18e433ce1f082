//! Configuration management.
//!
//! Supports configuration from:
//! - TOML config files
//! - Environment variables
//! - CLI arguments (for the server)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::catalog::InferenceTables;
use crate::error::{AtlasError, Result};
use crate::recommend::NeedKeywords;

/// Default upstream API base
pub const DEFAULT_UPSTREAM: &str = "https://openrouter.ai/api/v1";

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Upstream listing API
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// HTTP service
    #[serde(default)]
    pub server: ServerSection,

    /// Catalog refresh and browsing
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Need keyword table override
    #[serde(default)]
    pub classifier: NeedKeywords,

    /// Capability/vendor table override
    #[serde(default)]
    pub inference: InferenceTables,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            AtlasError::Config(format!("Failed to read config file {}: {e}", path.display()))
        })?;

        toml::from_str(&content)
            .map_err(|e| AtlasError::Config(format!("Failed to parse config: {e}")))
    }

    /// Default config file location (`<config dir>/model-atlas/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("model-atlas").join("config.toml"))
    }

    /// Resolve the effective configuration.
    ///
    /// An explicit path must exist. Without one, the default path is used
    /// when present. Environment overrides are applied last.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(path) => {
                    tracing::debug!(path = %path.display(), "loading default config");
                    Self::from_file(path)?
                },
                None => Self::default(),
            },
        };

        Ok(config.with_env())
    }

    /// Apply overrides from the process environment
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a variable lookup
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(key) = lookup("OPENROUTER_API_KEY").filter(|k| !k.is_empty()) {
            self.upstream.api_key = Some(key);
        }
        if let Some(upstream) = lookup("ATLAS_UPSTREAM") {
            self.upstream.base_url = upstream;
        }
        if let Some(host) = lookup("ATLAS_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!(value = %port, "ignoring invalid PORT"),
            }
        }
        if let Some(secs) = lookup("ATLAS_REFRESH_SECS") {
            match secs.parse() {
                Ok(secs) => self.catalog.refresh_interval_secs = secs,
                Err(_) => tracing::warn!(value = %secs, "ignoring invalid ATLAS_REFRESH_SECS"),
            }
        }

        self
    }
}

/// Upstream listing API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// API base URL (e.g., https://openrouter.ai/api/v1)
    pub base_url: String,

    /// Bearer token sent with upstream requests
    pub api_key: Option<String>,

    /// Request timeout in seconds; no timeout when unset
    pub timeout_secs: Option<u64>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_UPSTREAM.to_string(),
            api_key: None,
            timeout_secs: None,
        }
    }
}

impl UpstreamConfig {
    /// Model listing URL
    pub fn models_url(&self) -> String {
        format!("{}/models", self.base_url.trim_end_matches('/'))
    }
}

/// HTTP service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Allow cross-origin requests
    pub cors: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 10000,
            cors: true,
        }
    }
}

/// Catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Seconds between background refreshes; 0 disables them
    pub refresh_interval_secs: u64,

    /// Default page size for browsing
    pub page_size: usize,

    /// Seed for metric backfill, for reproducible catalogs
    pub seed: Option<u64>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: 300,
            page_size: 12,
            seed: None,
        }
    }
}
