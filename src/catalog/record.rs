//! Model record data structures.
//!
//! This module defines the core types for catalog entries:
//! - `ModelRecord`: one model as listed by the upstream or the fallback list
//! - `Pricing`: per-token or per-generation pricing
//! - `Metrics`: the accuracy/performance/price scores used for ranking
//! - `Factor`: which metric a recommendation request weighs
//!
//! Upstream data is loose: prices arrive as numbers or decimal strings,
//! capability tags may be unknown, and any of the derived fields may be
//! missing. Deserialization accepts all of that and leaves the gaps for
//! enhancement to fill.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use super::category::Category;

/// Provider label used when none can be inferred
pub const UNKNOWN_PROVIDER: &str = "Unknown Provider";

/// A model in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRecord {
    /// Model ID (e.g., "anthropic/claude-3-opus")
    pub id: String,

    /// Display name; falls back to the ID when the upstream omits it
    #[serde(default, deserialize_with = "deserialize_name")]
    pub name: String,

    /// Provider display name (e.g., "Anthropic")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,

    /// Free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Context window size in tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_length: Option<u64>,

    /// Pricing information
    #[serde(
        default,
        deserialize_with = "deserialize_pricing",
        skip_serializing_if = "Option::is_none"
    )]
    pub pricing: Option<Pricing>,

    /// Capability tags
    #[serde(
        default,
        deserialize_with = "deserialize_capabilities",
        skip_serializing_if = "Option::is_none"
    )]
    pub capabilities: Option<Vec<Category>>,

    /// Ranking metrics
    #[serde(
        default,
        deserialize_with = "deserialize_metrics",
        skip_serializing_if = "Option::is_none"
    )]
    pub metrics: Option<Metrics>,
}

impl ModelRecord {
    /// Create a bare record with only an ID and name
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            provider: None,
            description: None,
            context_length: None,
            pricing: None,
            capabilities: None,
            metrics: None,
        }
    }

    /// Builder: set provider
    pub fn provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Builder: set description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder: set context length
    pub fn context_length(mut self, tokens: u64) -> Self {
        self.context_length = Some(tokens);
        self
    }

    /// Builder: set pricing
    pub fn pricing(mut self, pricing: Pricing) -> Self {
        self.pricing = Some(pricing);
        self
    }

    /// Builder: set capabilities
    pub fn capabilities(mut self, capabilities: impl IntoIterator<Item = Category>) -> Self {
        self.capabilities = Some(capabilities.into_iter().collect());
        self
    }

    /// Builder: set metrics
    pub fn metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Capability tags, empty when absent
    pub fn capability_list(&self) -> &[Category] {
        self.capabilities.as_deref().unwrap_or(&[])
    }

    /// Check whether the record carries a capability
    pub fn has_capability(&self, category: Category) -> bool {
        self.capability_list().contains(&category)
    }

    /// Provider name, or the unknown-provider label
    pub fn provider_name(&self) -> &str {
        self.provider.as_deref().unwrap_or(UNKNOWN_PROVIDER)
    }
}

impl AsRef<ModelRecord> for ModelRecord {
    fn as_ref(&self) -> &ModelRecord {
        self
    }
}

/// Model pricing (USD)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Pricing {
    /// Cost per prompt and completion token
    PerToken {
        /// Cost per prompt/input token
        prompt: f64,
        /// Cost per completion/output token
        completion: f64,
    },
    /// Flat cost per generation call (image models)
    PerGeneration {
        /// Cost per generation
        generation: f64,
    },
}

impl Pricing {
    /// Per-token pricing
    pub fn per_token(prompt: f64, completion: f64) -> Self {
        Pricing::PerToken { prompt, completion }
    }

    /// Per-generation pricing
    pub fn per_generation(generation: f64) -> Self {
        Pricing::PerGeneration { generation }
    }
}

/// Upstream price value: OpenRouter sends decimal strings, curated data numbers
#[derive(Deserialize)]
#[serde(untagged)]
enum PriceValue {
    Number(f64),
    Text(String),
}

impl PriceValue {
    fn value(self) -> Option<f64> {
        match self {
            PriceValue::Number(n) => Some(n),
            PriceValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Deserialize)]
struct RawPricing {
    #[serde(default)]
    prompt: Option<PriceValue>,
    #[serde(default)]
    completion: Option<PriceValue>,
    #[serde(default)]
    generation: Option<PriceValue>,
}

impl RawPricing {
    fn into_pricing(self) -> Option<Pricing> {
        let prompt = self.prompt.and_then(PriceValue::value);
        let completion = self.completion.and_then(PriceValue::value);

        match (prompt, completion) {
            (Some(prompt), Some(completion)) => Some(Pricing::per_token(prompt, completion)),
            _ => self
                .generation
                .and_then(PriceValue::value)
                .map(Pricing::per_generation),
        }
    }
}

fn deserialize_pricing<'de, D>(deserializer: D) -> Result<Option<Pricing>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawPricing>::deserialize(deserializer)?;
    Ok(raw.and_then(RawPricing::into_pricing))
}

fn deserialize_capabilities<'de, D>(deserializer: D) -> Result<Option<Vec<Category>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<String>>::deserialize(deserializer)?;
    Ok(raw.map(|tags| {
        let mut categories = Vec::with_capacity(tags.len());
        for tag in tags {
            match tag.parse::<Category>() {
                Ok(category) if !categories.contains(&category) => categories.push(category),
                Ok(_) => {},
                Err(_) => tracing::debug!(tag = %tag, "dropping unknown capability tag"),
            }
        }
        categories
    }))
}

fn deserialize_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
struct RawMetrics {
    #[serde(default)]
    accuracy: Option<f64>,
    #[serde(default)]
    performance: Option<f64>,
    #[serde(default)]
    price: Option<f64>,
}

/// A metric the upstream left out scores zero
fn deserialize_metrics<'de, D>(deserializer: D) -> Result<Option<Metrics>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawMetrics>::deserialize(deserializer)?;
    Ok(raw.map(|m| {
        Metrics::new(
            m.accuracy.unwrap_or(0.0),
            m.performance.unwrap_or(0.0),
            m.price.unwrap_or(0.0),
        )
    }))
}

/// Ranking metrics, each on a 0-10 scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Output quality
    pub accuracy: f64,
    /// Speed and responsiveness
    pub performance: f64,
    /// Value for money
    pub price: f64,
}

impl Metrics {
    /// Create metrics
    pub fn new(accuracy: f64, performance: f64, price: f64) -> Self {
        Self {
            accuracy,
            performance,
            price,
        }
    }

    /// Metric value for a factor
    pub fn get(&self, factor: Factor) -> f64 {
        match factor {
            Factor::Accuracy => self.accuracy,
            Factor::Performance => self.performance,
            Factor::Price => self.price,
        }
    }
}

/// A metric a recommendation request weighs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Factor {
    /// Weigh output quality
    Accuracy,
    /// Weigh speed
    Performance,
    /// Weigh value for money
    #[serde(alias = "price-value")]
    Price,
}

impl Factor {
    /// All factors
    pub const ALL: [Factor; 3] = [Factor::Accuracy, Factor::Performance, Factor::Price];

    /// Factor name as used in requests
    pub fn as_str(&self) -> &'static str {
        match self {
            Factor::Accuracy => "accuracy",
            Factor::Performance => "performance",
            Factor::Price => "price",
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Factor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "accuracy" => Ok(Factor::Accuracy),
            "performance" | "speed" => Ok(Factor::Performance),
            "price" | "price-value" | "cost" => Ok(Factor::Price),
            _ => Err(format!("unknown factor: {s}")),
        }
    }
}
