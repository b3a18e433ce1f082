//! Need classification: free text to need categories.

use serde::{Deserialize, Serialize};

use crate::catalog::Category;

/// Keywords that signal one need category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeedRule {
    /// Category signalled
    pub category: Category,
    /// Lower-case substrings to look for
    pub keywords: Vec<String>,
}

/// Keyword table for the classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeedKeywords {
    /// One rule per category; a category may appear more than once
    pub rules: Vec<NeedRule>,
}

impl Default for NeedKeywords {
    fn default() -> Self {
        let rule = |category, keywords: &[&str]| NeedRule {
            category,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        };

        Self {
            rules: vec![
                rule(
                    Category::Coding,
                    &["code", "programming", "develop", "software", "script", "debug"],
                ),
                rule(
                    Category::Chat,
                    &["chat", "talk", "convers", "discuss", "communicate"],
                ),
                rule(
                    Category::ProblemSolving,
                    &["problem", "solve", "analyze", "research", "complex", "reason"],
                ),
                rule(
                    Category::ItSupport,
                    &["support", "troubleshoot", "fix", "technical", "error", "help with"],
                ),
                rule(
                    Category::Content,
                    &[
                        "content",
                        "write",
                        "blog",
                        "article",
                        "essay",
                        "story",
                        "marketing",
                        "creative",
                    ],
                ),
                rule(
                    Category::Media,
                    &[
                        "image", "picture", "photo", "visual", "design", "generate", "create",
                        "art",
                    ],
                ),
            ],
        }
    }
}

/// Maps a need statement to categories
#[derive(Debug, Clone, Default)]
pub struct CategoryClassifier {
    keywords: NeedKeywords,
}

impl CategoryClassifier {
    /// Create a classifier with a custom keyword table
    pub fn new(keywords: NeedKeywords) -> Self {
        Self { keywords }
    }

    /// Keyword table in use
    pub fn keywords(&self) -> &NeedKeywords {
        &self.keywords
    }

    /// Categories the text asks for, in canonical order.
    ///
    /// Matching is case-insensitive substring search and every category is
    /// checked independently. Text that matches nothing asks for chat.
    ///
    /// # Example
    /// ```
    /// use atlas::catalog::Category;
    /// use atlas::recommend::CategoryClassifier;
    ///
    /// let classifier = CategoryClassifier::default();
    /// assert_eq!(
    ///     classifier.classify("Write a blog post about our new API"),
    ///     vec![Category::Content]
    /// );
    /// assert_eq!(classifier.classify("hmm"), vec![Category::Chat]);
    /// ```
    pub fn classify(&self, text: &str) -> Vec<Category> {
        let text = text.to_lowercase();

        let needed: Vec<Category> = Category::ALL
            .into_iter()
            .filter(|category| {
                self.keywords.rules.iter().any(|rule| {
                    rule.category == *category
                        && rule.keywords.iter().any(|k| text.contains(k.as_str()))
                })
            })
            .collect();

        if needed.is_empty() {
            vec![Category::Chat]
        } else {
            needed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debugging_request_needs_coding() {
        let classifier = CategoryClassifier::default();
        let needed = classifier.classify("I need help debugging my Python script");
        assert_eq!(needed, vec![Category::Coding]);
    }

    #[test]
    fn test_multiple_categories() {
        let classifier = CategoryClassifier::default();
        let needed = classifier.classify("Help with FIXING errors and writing a story");
        // "writing" does not contain "write"; "story" does the work
        assert_eq!(needed, vec![Category::ItSupport, Category::Content]);
    }

    #[test]
    fn test_default_is_chat() {
        let classifier = CategoryClassifier::default();
        assert_eq!(classifier.classify(""), vec![Category::Chat]);
        assert_eq!(classifier.classify("Hello there"), vec![Category::Chat]);
    }

    #[test]
    fn test_rule_order_does_not_matter() {
        let mut reversed = NeedKeywords::default();
        reversed.rules.reverse();

        let text = "design a picture and analyze my code";
        assert_eq!(
            CategoryClassifier::new(reversed).classify(text),
            CategoryClassifier::default().classify(text)
        );
    }

    #[test]
    fn test_custom_table() {
        let keywords = NeedKeywords {
            rules: vec![NeedRule {
                category: Category::Media,
                keywords: vec!["video".into()],
            }],
        };
        let classifier = CategoryClassifier::new(keywords);
        assert_eq!(classifier.classify("Edit my VIDEO"), vec![Category::Media]);
        assert_eq!(classifier.classify("write code"), vec![Category::Chat]);
    }
}
