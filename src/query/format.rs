//! Display text for catalog entries.

use crate::catalog::{Category, ModelRecord, Pricing};

/// Order strengths are listed in
const STRENGTH_ORDER: [Category; 5] = [
    Category::Coding,
    Category::ProblemSolving,
    Category::Content,
    Category::ItSupport,
    Category::Media,
];

/// Short description of what a model is good at.
///
/// # Example
/// ```
/// use atlas::catalog::{Category, ModelRecord};
/// use atlas::query::strengths_of;
///
/// let record = ModelRecord::new("x/y", "Y").capabilities([Category::Media, Category::Coding]);
/// assert_eq!(strengths_of(&record), "Software development, Media generation");
/// ```
pub fn strengths_of(record: &ModelRecord) -> String {
    let capabilities = record.capability_list();
    if capabilities.is_empty() {
        return "General purpose AI assistance".to_string();
    }

    let labels: Vec<&str> = STRENGTH_ORDER
        .iter()
        .filter(|category| capabilities.contains(category))
        .filter_map(|category| category.strength_label())
        .collect();

    if labels.is_empty() {
        "General conversation".to_string()
    } else {
        labels.join(", ")
    }
}

/// Price text, quoted per 1K tokens for token-priced models
pub fn format_price(record: &ModelRecord) -> String {
    match record.pricing {
        Some(Pricing::PerToken { prompt, completion }) => format!(
            "${:.4}/${:.4} per 1K tokens",
            prompt * 1000.0,
            completion * 1000.0
        ),
        Some(Pricing::PerGeneration { generation }) => format!("${:.4} per generation", generation),
        None => "Varies".to_string(),
    }
}
