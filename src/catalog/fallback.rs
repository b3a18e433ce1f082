//! Built-in fallback catalog.
//!
//! Hand-curated records used whenever the upstream listing is unreachable or
//! returns nothing. Every entry is complete, so enhancement leaves them as is.

use super::category::Category::{self, Chat, Coding, Content, ItSupport, Media, ProblemSolving};
use super::record::{Metrics, ModelRecord, Pricing};

/// Fallback pricing as a const-friendly value
#[derive(Debug, Clone, Copy)]
pub enum FallbackPrice {
    /// (prompt, completion) per token
    Tokens(f64, f64),
    /// Per generation call
    Generation(f64),
}

/// A compile-time fallback entry
#[derive(Debug, Clone, Copy)]
pub struct FallbackModel {
    /// Model ID
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Provider display name
    pub provider: &'static str,
    /// Description
    pub description: &'static str,
    /// Context window, if the model has one
    pub context_length: Option<u64>,
    /// Pricing
    pub price: FallbackPrice,
    /// Capability tags
    pub capabilities: &'static [Category],
    /// (accuracy, performance, price)
    pub metrics: (f64, f64, f64),
}

impl FallbackModel {
    /// Convert into an owned record
    pub fn to_record(&self) -> ModelRecord {
        let pricing = match self.price {
            FallbackPrice::Tokens(prompt, completion) => Pricing::per_token(prompt, completion),
            FallbackPrice::Generation(generation) => Pricing::per_generation(generation),
        };
        let (accuracy, performance, price) = self.metrics;

        let record = ModelRecord::new(self.id, self.name)
            .provider(self.provider)
            .description(self.description)
            .pricing(pricing)
            .capabilities(self.capabilities.iter().copied())
            .metrics(Metrics::new(accuracy, performance, price));

        match self.context_length {
            Some(tokens) => record.context_length(tokens),
            None => record,
        }
    }
}

/// All fallback models
pub static FALLBACK_MODELS: &[FallbackModel] = &[
    // ============================================================
    // Anthropic
    // ============================================================
    FallbackModel {
        id: "anthropic/claude-3-opus",
        name: "Claude 3 Opus",
        provider: "Anthropic",
        description: "Anthropic's most powerful model for highly complex tasks requiring deep analysis and carefully considered responses.",
        context_length: Some(200000),
        price: FallbackPrice::Tokens(0.000015, 0.000075),
        capabilities: &[Chat, ProblemSolving, Content, Coding],
        metrics: (9.8, 9.5, 7.5),
    },
    FallbackModel {
        id: "anthropic/claude-3-sonnet",
        name: "Claude 3 Sonnet",
        provider: "Anthropic",
        description: "Anthropic's balanced model offering high intelligence with greater efficiency.",
        context_length: Some(200000),
        price: FallbackPrice::Tokens(0.000003, 0.000015),
        capabilities: &[Chat, ProblemSolving, Content],
        metrics: (9.5, 9.2, 8.5),
    },
    FallbackModel {
        id: "anthropic/claude-3-haiku",
        name: "Claude 3 Haiku",
        provider: "Anthropic",
        description: "Anthropic's fastest and most compact model for near-instant responses.",
        context_length: Some(200000),
        price: FallbackPrice::Tokens(0.00000025, 0.0000013),
        capabilities: &[Chat, Content],
        metrics: (9.0, 9.8, 9.5),
    },
    // ============================================================
    // OpenAI
    // ============================================================
    FallbackModel {
        id: "openai/gpt-4o",
        name: "GPT-4o",
        provider: "OpenAI",
        description: "OpenAI's most advanced model, optimized for a balance of intelligence and speed.",
        context_length: Some(128000),
        price: FallbackPrice::Tokens(0.000005, 0.000015),
        capabilities: &[Chat, ProblemSolving, Content, Coding, ItSupport],
        metrics: (9.7, 9.6, 8.0),
    },
    FallbackModel {
        id: "openai/gpt-4-turbo",
        name: "GPT-4 Turbo",
        provider: "OpenAI",
        description: "OpenAI's powerful model with enhanced capabilities and improved performance.",
        context_length: Some(128000),
        price: FallbackPrice::Tokens(0.000005, 0.000015),
        capabilities: &[Chat, ProblemSolving, Content, Coding, ItSupport],
        metrics: (9.6, 9.4, 8.0),
    },
    FallbackModel {
        id: "openai/gpt-3.5-turbo",
        name: "GPT-3.5 Turbo",
        provider: "OpenAI",
        description: "OpenAI's efficient model balancing capability and cost-effectiveness.",
        context_length: Some(16000),
        price: FallbackPrice::Tokens(0.0000005, 0.0000015),
        capabilities: &[Chat, Content, ItSupport],
        metrics: (8.5, 9.0, 9.8),
    },
    // ============================================================
    // Google
    // ============================================================
    FallbackModel {
        id: "google/gemini-1.5-pro",
        name: "Gemini 1.5 Pro",
        provider: "Google",
        description: "Google's advanced multimodal model with strong reasoning capabilities.",
        context_length: Some(1000000),
        price: FallbackPrice::Tokens(0.000005, 0.000015),
        capabilities: &[Chat, ProblemSolving, Content, Coding, Media],
        metrics: (9.5, 9.3, 8.0),
    },
    FallbackModel {
        id: "google/gemini-1.5-flash",
        name: "Gemini 1.5 Flash",
        provider: "Google",
        description: "Google's efficient model optimized for speed and responsiveness.",
        context_length: Some(1000000),
        price: FallbackPrice::Tokens(0.0000005, 0.0000015),
        capabilities: &[Chat, Content],
        metrics: (8.8, 9.7, 9.5),
    },
    // ============================================================
    // Meta
    // ============================================================
    FallbackModel {
        id: "meta-llama/llama-3-70b-instruct",
        name: "Llama 3 70B",
        provider: "Meta",
        description: "Meta's largest open model with strong performance across various tasks.",
        context_length: Some(8000),
        price: FallbackPrice::Tokens(0.0000007, 0.0000009),
        capabilities: &[Chat, ProblemSolving, Content, Coding],
        metrics: (9.2, 8.8, 9.6),
    },
    FallbackModel {
        id: "meta-llama/llama-3-8b-instruct",
        name: "Llama 3 8B",
        provider: "Meta",
        description: "Meta's compact model offering good performance with high efficiency.",
        context_length: Some(8000),
        price: FallbackPrice::Tokens(0.0000002, 0.0000003),
        capabilities: &[Chat, Content],
        metrics: (8.0, 9.2, 9.9),
    },
    // ============================================================
    // Mistral AI
    // ============================================================
    FallbackModel {
        id: "mistralai/mistral-large",
        name: "Mistral Large",
        provider: "Mistral AI",
        description: "Mistral's flagship model with excellent reasoning and coding capabilities.",
        context_length: Some(32000),
        price: FallbackPrice::Tokens(0.000002, 0.000006),
        capabilities: &[Chat, ProblemSolving, Content, Coding],
        metrics: (9.4, 9.2, 8.8),
    },
    FallbackModel {
        id: "mistralai/mistral-medium",
        name: "Mistral Medium",
        provider: "Mistral AI",
        description: "Mistral's balanced model offering good performance at a moderate cost.",
        context_length: Some(32000),
        price: FallbackPrice::Tokens(0.000001, 0.000003),
        capabilities: &[Chat, Content, Coding],
        metrics: (8.9, 9.0, 9.2),
    },
    FallbackModel {
        id: "mistralai/mistral-small",
        name: "Mistral Small",
        provider: "Mistral AI",
        description: "Mistral's efficient model designed for speed and cost-effectiveness.",
        context_length: Some(32000),
        price: FallbackPrice::Tokens(0.0000002, 0.0000006),
        capabilities: &[Chat, Content],
        metrics: (8.2, 9.5, 9.7),
    },
    FallbackModel {
        id: "anthropic/claude-2",
        name: "Claude 2",
        provider: "Anthropic",
        description: "Anthropic's previous generation model with strong reasoning capabilities.",
        context_length: Some(100000),
        price: FallbackPrice::Tokens(0.000008, 0.000024),
        capabilities: &[Chat, ProblemSolving, Content],
        metrics: (9.0, 8.5, 8.0),
    },
    // ============================================================
    // Cohere
    // ============================================================
    FallbackModel {
        id: "cohere/command-r",
        name: "Command R",
        provider: "Cohere",
        description: "Cohere's powerful model optimized for enterprise applications and reasoning.",
        context_length: Some(128000),
        price: FallbackPrice::Tokens(0.000001, 0.000003),
        capabilities: &[Chat, ProblemSolving, Content, ItSupport],
        metrics: (9.1, 9.0, 9.0),
    },
    FallbackModel {
        id: "cohere/command-r-plus",
        name: "Command R+",
        provider: "Cohere",
        description: "Cohere's enhanced model with improved reasoning and specialized capabilities.",
        context_length: Some(128000),
        price: FallbackPrice::Tokens(0.000003, 0.000009),
        capabilities: &[Chat, ProblemSolving, Content, Coding, ItSupport],
        metrics: (9.3, 9.1, 8.5),
    },
    // ============================================================
    // Image generation
    // ============================================================
    FallbackModel {
        id: "stability/stable-diffusion-xl",
        name: "Stable Diffusion XL",
        provider: "Stability AI",
        description: "Stability AI's advanced image generation model with high-quality outputs.",
        context_length: None,
        price: FallbackPrice::Generation(0.002),
        capabilities: &[Media],
        metrics: (9.0, 8.8, 8.5),
    },
    FallbackModel {
        id: "openai/dall-e-3",
        name: "DALL-E 3",
        provider: "OpenAI",
        description: "OpenAI's advanced image generation model with exceptional detail and accuracy.",
        context_length: None,
        price: FallbackPrice::Generation(0.004),
        capabilities: &[Media],
        metrics: (9.5, 9.0, 7.5),
    },
    FallbackModel {
        id: "google/gemini-pro-vision",
        name: "Gemini Pro Vision",
        provider: "Google",
        description: "Google's multimodal model capable of understanding and generating content from images.",
        context_length: Some(16000),
        price: FallbackPrice::Tokens(0.000001, 0.000003),
        capabilities: &[Chat, Media],
        metrics: (9.2, 9.0, 8.8),
    },
];

/// All fallback models as owned records, in catalog order
pub fn fallback_models() -> Vec<ModelRecord> {
    FALLBACK_MODELS.iter().map(FallbackModel::to_record).collect()
}

/// Get a fallback model by ID
pub fn fallback_by_id(id: &str) -> Option<ModelRecord> {
    FALLBACK_MODELS
        .iter()
        .find(|model| model.id == id)
        .map(FallbackModel::to_record)
}
