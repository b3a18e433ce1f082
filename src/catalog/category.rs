//! Need categories shared by capability tags, the classifier and the scorer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::record::ModelRecord;

/// What a model is suited for.
///
/// The same six tags describe both a model's capabilities and the needs a
/// user expresses. Declaration order is the canonical order used wherever a
/// list of categories is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Writing, reviewing and debugging code
    Coding,
    /// General conversation
    Chat,
    /// Reasoning and analysis
    ProblemSolving,
    /// Technical troubleshooting
    ItSupport,
    /// Written content creation
    Content,
    /// Image, audio and other media generation
    Media,
}

impl Category {
    /// All categories in canonical order.
    pub const ALL: [Category; 6] = [
        Category::Coding,
        Category::Chat,
        Category::ProblemSolving,
        Category::ItSupport,
        Category::Content,
        Category::Media,
    ];

    /// Raw tag as it appears in catalog data (e.g. `problem-solving`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Coding => "coding",
            Category::Chat => "chat",
            Category::ProblemSolving => "problem-solving",
            Category::ItSupport => "it-support",
            Category::Content => "content",
            Category::Media => "media",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Coding => "Coding & Development",
            Category::Chat => "General Chat",
            Category::ProblemSolving => "Problem Solving",
            Category::ItSupport => "IT Support",
            Category::Content => "Content Creation",
            Category::Media => "Media Generation",
        }
    }

    /// One-sentence description of the models in this category
    pub fn description(&self) -> &'static str {
        match self {
            Category::Coding => {
                "Models that excel at understanding, generating, and debugging code across various programming languages."
            },
            Category::Chat => {
                "Models optimized for natural conversation and general-purpose dialogue."
            },
            Category::ProblemSolving => {
                "Models with strong reasoning capabilities for complex problem-solving and analysis."
            },
            Category::ItSupport => {
                "Models specialized in technical troubleshooting and IT assistance."
            },
            Category::Content => {
                "Models that excel at generating high-quality written content like articles, blogs, and marketing copy."
            },
            Category::Media => {
                "Models designed for creating images, audio, or other media content."
            },
        }
    }

    /// Strength label used when describing what a model is good at.
    ///
    /// Chat has no label of its own; it only shows up as the
    /// "General conversation" fallback.
    pub fn strength_label(&self) -> Option<&'static str> {
        match self {
            Category::Coding => Some("Software development"),
            Category::ProblemSolving => Some("Complex problem solving"),
            Category::Content => Some("Content creation"),
            Category::ItSupport => Some("Technical support"),
            Category::Media => Some("Media generation"),
            Category::Chat => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

/// Category filter for browsing: everything, or one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Every record
    #[default]
    All,
    /// Records carrying this capability
    Only(Category),
}

impl CategoryFilter {
    /// Check whether a record passes the filter
    pub fn matches(&self, record: &ModelRecord) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => record.has_capability(*category),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            s.parse().map(CategoryFilter::Only)
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Only(category) => category.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_uses_kebab_case_tags() {
        let json = serde_json::to_string(&Category::ProblemSolving).unwrap();
        assert_eq!(json, "\"problem-solving\"");

        let parsed: Category = serde_json::from_str("\"it-support\"").unwrap();
        assert_eq!(parsed, Category::ItSupport);
    }

    #[test]
    fn test_from_str_matches_as_str() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
        }
        assert!("vision".parse::<Category>().is_err());
    }

    #[test]
    fn test_filter_parsing() {
        assert_eq!("all".parse::<CategoryFilter>(), Ok(CategoryFilter::All));
        assert_eq!(
            "Media".parse::<CategoryFilter>(),
            Ok(CategoryFilter::Only(Category::Media))
        );
        assert!("everything".parse::<CategoryFilter>().is_err());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Category::Coding.display_name(), "Coding & Development");
        assert_eq!(Category::ItSupport.display_name(), "IT Support");
        assert_eq!(Category::Chat.strength_label(), None);
    }
}
