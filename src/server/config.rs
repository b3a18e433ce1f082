//! Server configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr, ToSocketAddrs};
use std::time::Duration;

use crate::catalog::InferenceTables;
use crate::config::{Config, DEFAULT_UPSTREAM};
use crate::error::{AtlasError, Result};
use crate::recommend::NeedKeywords;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address
    pub addr: SocketAddr,
    /// Upstream API base URL
    pub upstream: String,
    /// Bearer token for the upstream
    pub api_key: Option<String>,
    /// Upstream request timeout; none by default
    pub timeout: Option<Duration>,
    /// Background refresh period; `None` disables it
    pub refresh_interval: Option<Duration>,
    /// Default page size for `/api/catalog`
    pub page_size: usize,
    /// Seed for metric backfill
    pub seed: Option<u64>,
    /// CORS enabled
    pub cors_enabled: bool,
    /// Capability/vendor inference tables
    pub inference: InferenceTables,
    /// Need keyword table
    pub keywords: NeedKeywords,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 10000),
            upstream: DEFAULT_UPSTREAM.to_string(),
            api_key: None,
            timeout: None,
            refresh_interval: Some(Duration::from_secs(300)),
            page_size: 12,
            seed: None,
            cors_enabled: true,
            inference: InferenceTables::default(),
            keywords: NeedKeywords::default(),
        }
    }
}

impl ServerConfig {
    /// Build from the file/env configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let addr = resolve_listen_addr(&config.server.host, config.server.port)?;

        Ok(Self {
            addr,
            upstream: config.upstream.base_url.clone(),
            api_key: config.upstream.api_key.clone(),
            timeout: config.upstream.timeout_secs.map(Duration::from_secs),
            refresh_interval: None,
            page_size: config.catalog.page_size,
            seed: config.catalog.seed,
            cors_enabled: config.server.cors,
            inference: config.inference.clone(),
            keywords: config.classifier.clone(),
        }
        .with_refresh_secs(config.catalog.refresh_interval_secs))
    }

    /// Create with custom port
    pub fn with_port(mut self, port: u16) -> Self {
        self.addr.set_port(port);
        self
    }

    /// Bind to all interfaces
    pub fn bind_all(mut self) -> Self {
        self.addr.set_ip(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        self
    }

    /// Set the upstream API base URL
    pub fn with_upstream(mut self, upstream: impl Into<String>) -> Self {
        self.upstream = upstream.into();
        self
    }

    /// Refresh every `secs` seconds; 0 disables background refresh
    pub fn with_refresh_secs(mut self, secs: u64) -> Self {
        self.refresh_interval = (secs > 0).then(|| Duration::from_secs(secs));
        self
    }

    /// Disable CORS
    pub fn without_cors(mut self) -> Self {
        self.cors_enabled = false;
        self
    }

    /// Model listing URL
    pub fn models_url(&self) -> String {
        format!("{}/models", self.upstream.trim_end_matches('/'))
    }
}

/// IP literals are used as-is; hostnames go through the system resolver
fn resolve_listen_addr(host: &str, port: u16) -> Result<SocketAddr> {
    if let Ok(ip) = host.parse::<IpAddr>() {
        return Ok(SocketAddr::new(ip, port));
    }

    let invalid = |reason: String| {
        AtlasError::Config(format!("Invalid listen address {host}:{port}: {reason}"))
    };

    let mut addrs = (host, port)
        .to_socket_addrs()
        .map_err(|e| invalid(e.to_string()))?;
    addrs
        .next()
        .ok_or_else(|| invalid("host resolved to no addresses".to_string()))
}
