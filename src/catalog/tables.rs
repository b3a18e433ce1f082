//! Keyword tables for filling in missing record metadata.
//!
//! Both tables are plain data so they can be overridden from the
//! `[inference]` section of the config file.

use serde::{Deserialize, Serialize};

use super::category::Category;

/// Which text of a record a capability rule looks at
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleScope {
    /// Name only
    Name,
    /// Description only
    Description,
    /// Name and description
    #[default]
    Both,
}

/// Adds `category` when the scoped text mentions any keyword
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapabilityRule {
    /// Capability to add
    pub category: Category,
    /// Lower-case substrings that trigger it
    pub keywords: Vec<String>,
    /// Text the keywords are matched against
    #[serde(default)]
    pub scope: RuleScope,
}

/// Maps id/name substrings to a provider display name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorRule {
    /// Provider display name (e.g., "Mistral AI")
    pub provider: String,
    /// Lower-case substrings matched against id and name
    pub keywords: Vec<String>,
}

/// Capability and vendor inference tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceTables {
    /// Capability rules; `chat` is always implied
    #[serde(default = "default_capability_rules")]
    pub capabilities: Vec<CapabilityRule>,
    /// Vendor rules, first match wins
    #[serde(default = "default_vendor_rules")]
    pub vendors: Vec<VendorRule>,
}

impl Default for InferenceTables {
    fn default() -> Self {
        Self {
            capabilities: default_capability_rules(),
            vendors: default_vendor_rules(),
        }
    }
}

fn rule(category: Category, keywords: &[&str]) -> CapabilityRule {
    CapabilityRule {
        category,
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        scope: RuleScope::Both,
    }
}

fn name_rule(category: Category, keywords: &[&str]) -> CapabilityRule {
    CapabilityRule {
        scope: RuleScope::Name,
        ..rule(category, keywords)
    }
}

fn vendor(provider: &str, keywords: &[&str]) -> VendorRule {
    VendorRule {
        provider: provider.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
    }
}

/// Default capability inference rules
pub fn default_capability_rules() -> Vec<CapabilityRule> {
    vec![
        rule(Category::Coding, &["code", "programming", "developer"]),
        rule(
            Category::ProblemSolving,
            &["reason", "problem", "complex", "analysis"],
        ),
        rule(Category::Content, &["content", "writing", "creative", "text"]),
        rule(
            Category::ItSupport,
            &["support", "technical", "troubleshoot"],
        ),
        rule(Category::Media, &["image", "visual", "media", "generate"]),
        name_rule(Category::Media, &["vision", "dall", "diffusion"]),
    ]
}

/// Default vendor table
pub fn default_vendor_rules() -> Vec<VendorRule> {
    vec![
        vendor("OpenAI", &["openai", "gpt", "dall-e"]),
        vendor("Anthropic", &["anthropic", "claude"]),
        vendor("Google", &["google", "gemini"]),
        vendor("Meta", &["meta", "llama"]),
        vendor("Mistral AI", &["mistral"]),
        vendor("Cohere", &["cohere", "command"]),
        vendor("Stability AI", &["stability", "stable diffusion"]),
    ]
}
