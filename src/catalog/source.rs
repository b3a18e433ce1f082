//! Catalog sources: where raw model records come from.
//!
//! The store only needs "give me the current listing"; a source either
//! returns records or an error, and the store decides what to do with an
//! error or an empty list.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use super::record::ModelRecord;
use crate::error::{AtlasError, Result};

/// A provider of raw catalog records.
pub trait CatalogSource: Send + Sync {
    /// Fetch the current listing.
    fn fetch(&self) -> Pin<Box<dyn Future<Output = Result<Vec<ModelRecord>>> + Send + '_>>;

    /// Source name for logging.
    fn name(&self) -> &'static str;
}

/// Listing envelope: `{data: [...]}` from the upstream, or the proxy's
/// `{fallback: true, data, error, message}`.
#[derive(Debug, Deserialize)]
pub struct ListingEnvelope {
    /// Raw records
    #[serde(default)]
    pub data: Vec<Value>,
    /// Set when the data is the proxy's fallback list
    #[serde(default)]
    pub fallback: bool,
    /// Short error label
    #[serde(default)]
    pub error: Option<String>,
    /// Error detail
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListingBody {
    Bare(Vec<Value>),
    Envelope(ListingEnvelope),
}

/// Turn raw JSON records into model records.
///
/// Entries that cannot be read at all (no id, wrong shape) are skipped with
/// a warning; the rest of the listing is kept. A missing name defaults to
/// the id.
pub fn parse_records(values: Vec<Value>) -> Vec<ModelRecord> {
    let mut records = Vec::with_capacity(values.len());

    for value in values {
        match serde_json::from_value::<ModelRecord>(value) {
            Ok(mut record) => {
                if record.name.trim().is_empty() {
                    record.name = record.id.clone();
                }
                records.push(record);
            },
            Err(e) => tracing::warn!(error = %e, "skipping unreadable model record"),
        }
    }

    records
}

/// Parse a listing body (envelope or bare array) into records
pub fn parse_listing(body: &str) -> Result<Vec<ModelRecord>> {
    let values = match serde_json::from_str::<ListingBody>(body)? {
        ListingBody::Bare(values) => values,
        ListingBody::Envelope(envelope) => {
            if envelope.fallback {
                tracing::warn!(
                    error = envelope.error.as_deref().unwrap_or(""),
                    message = envelope.message.as_deref().unwrap_or(""),
                    "listing carries fallback data"
                );
            }
            envelope.data
        },
    };

    Ok(parse_records(values))
}

/// Fetches the listing over HTTP
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    url: String,
    api_key: Option<String>,
}

impl HttpSource {
    /// Create a source for a listing URL.
    ///
    /// Without a timeout the transport default applies.
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AtlasError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self::with_client(client, url))
    }

    /// Create a source that shares an existing client
    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            api_key: None,
        }
    }

    /// Send `Authorization: Bearer <key>` with each request
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    /// Listing URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the raw listing body.
    ///
    /// A non-success status is an `Upstream` error carrying the body.
    pub async fn fetch_body(&self) -> Result<String> {
        let mut request = self
            .client
            .get(&self.url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AtlasError::Upstream {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(body)
    }

    async fn fetch_listing(&self) -> Result<Vec<ModelRecord>> {
        let body = self.fetch_body().await?;
        parse_listing(&body)
    }
}

impl CatalogSource for HttpSource {
    fn fetch(&self) -> Pin<Box<dyn Future<Output = Result<Vec<ModelRecord>>> + Send + '_>> {
        Box::pin(self.fetch_listing())
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

/// A fixed in-memory listing
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    records: Vec<ModelRecord>,
}

impl StaticSource {
    /// Serve these records on every fetch
    pub fn new(records: Vec<ModelRecord>) -> Self {
        Self { records }
    }

    /// A source with nothing in it; the store will use its fallback list
    pub fn empty() -> Self {
        Self::default()
    }
}

impl CatalogSource for StaticSource {
    fn fetch(&self) -> Pin<Box<dyn Future<Output = Result<Vec<ModelRecord>>> + Send + '_>> {
        let records = self.records.clone();
        Box::pin(async move { Ok(records) })
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_records_are_kept() {
        let body = r#"{"data": [
            {"id": "a/null-name", "name": null},
            {"id": "b/partial-metrics", "name": "B", "metrics": {"accuracy": 9.0}},
            {"id": "c/ok", "name": "C"}
        ]}"#;

        let records = parse_listing(body).unwrap();
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["a/null-name", "b/partial-metrics", "c/ok"]);
        assert_eq!(records[0].name, "a/null-name");
    }

    #[test]
    fn test_parse_envelope() {
        let body = r#"{
            "data": [
                {"id": "openai/gpt-4o", "name": "OpenAI: GPT-4o", "context_length": 128000},
                {"id": "anthropic/claude-3-opus"}
            ]
        }"#;

        let records = parse_listing(body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "OpenAI: GPT-4o");
        assert_eq!(records[1].name, "anthropic/claude-3-opus");
    }

    #[test]
    fn test_parse_fallback_envelope() {
        let body = r#"{
            "error": "Failed to fetch models",
            "message": "connection refused",
            "fallback": true,
            "data": [{"id": "cohere/command-r", "name": "Command R"}]
        }"#;

        let records = parse_listing(body).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "cohere/command-r");
    }

    #[test]
    fn test_parse_bare_array() {
        let records = parse_listing(r#"[{"id": "a/b", "name": "B"}]"#).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_unreadable_records_skipped() {
        let body = r#"{"data": [{"name": "no id"}, 42, {"id": "ok/model"}]}"#;
        let records = parse_listing(body).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "ok/model");
    }

    #[test]
    fn test_garbage_body_is_error() {
        assert!(parse_listing("<html>Bad Gateway</html>").is_err());
    }

    #[test]
    fn test_static_source() {
        let source = StaticSource::new(vec![ModelRecord::new("a/b", "B")]);
        let records = tokio_test::block_on(source.fetch()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(source.name(), "static");

        let empty = tokio_test::block_on(StaticSource::empty().fetch()).unwrap();
        assert!(empty.is_empty());
    }
}
