//! Needs-based model recommendation.
//!
//! Two steps:
//! 1. `CategoryClassifier` turns a free-text need into categories
//! 2. `Recommender` scores the catalog against them and keeps the top three

mod classifier;
mod scorer;

pub use classifier::{CategoryClassifier, NeedKeywords, NeedRule};
pub use scorer::{
    match_percent, score_models, Recommendation, Recommender, ScoredModel, CATEGORY_WEIGHT,
    DEFAULT_LIMIT, METRIC_WEIGHT,
};
