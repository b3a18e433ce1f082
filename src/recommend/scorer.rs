//! Recommendation scoring.
//!
//! Each candidate's score blends how many of the needed categories it
//! covers with the metrics the caller cares about:
//!
//! ```text
//! category = |matched| / |needed|
//! metrics  = Σ metrics[f] / (|factors| × 10)
//! score    = 0.7 × category + 0.3 × metrics
//! ```

use serde::Serialize;

use super::classifier::CategoryClassifier;
use crate::catalog::{Category, Factor, ModelRecord};

/// Weight of category coverage in the blended score
pub const CATEGORY_WEIGHT: f64 = 0.7;

/// Weight of the selected metrics in the blended score
pub const METRIC_WEIGHT: f64 = 0.3;

/// Default number of recommendations returned
pub const DEFAULT_LIMIT: usize = 3;

/// A recommended model
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// The model
    #[serde(flatten)]
    pub model: ModelRecord,
    /// Blended score as a percentage (0-100)
    pub match_score: u8,
    /// Display names of the needed categories this model covers
    pub matched_categories: Vec<String>,
}

/// A scored candidate before truncation
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredModel<'a> {
    /// The model
    pub model: &'a ModelRecord,
    /// Blended score in [0, 1]
    pub score: f64,
    /// Needed categories this model covers, in needed order
    pub matched: Vec<Category>,
}

/// Score every record against the needed categories.
///
/// Records without capabilities or without any needed category are left
/// out. The result is sorted by score, highest first; equal scores keep
/// catalog order.
///
/// `factors` must not be empty.
pub fn score_models<'a>(
    records: &'a [ModelRecord],
    needed: &[Category],
    factors: &[Factor],
) -> Vec<ScoredModel<'a>> {
    debug_assert!(!factors.is_empty(), "at least one factor is required");

    let mut scored: Vec<ScoredModel<'a>> = records
        .iter()
        .filter_map(|model| {
            let capabilities = model.capability_list();
            if capabilities.is_empty() {
                return None;
            }

            let matched: Vec<Category> = needed
                .iter()
                .copied()
                .filter(|category| capabilities.contains(category))
                .collect();
            if matched.is_empty() {
                return None;
            }

            let category_score = matched.len() as f64 / needed.len() as f64;
            let metric_score = model.metrics.map_or(0.0, |metrics| {
                let sum: f64 = factors.iter().map(|f| metrics.get(*f)).sum();
                sum / (factors.len() as f64 * 10.0)
            });

            Some(ScoredModel {
                model,
                score: CATEGORY_WEIGHT * category_score + METRIC_WEIGHT * metric_score,
                matched,
            })
        })
        .collect();

    // sort_by is stable, so ties keep catalog order
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}

/// Percentage form of a blended score
pub fn match_percent(score: f64) -> u8 {
    (score * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Needs-based recommender
#[derive(Debug, Clone)]
pub struct Recommender {
    classifier: CategoryClassifier,
    limit: usize,
}

impl Default for Recommender {
    fn default() -> Self {
        Self::new(CategoryClassifier::default())
    }
}

impl Recommender {
    /// Create a recommender returning the top three
    pub fn new(classifier: CategoryClassifier) -> Self {
        Self {
            classifier,
            limit: DEFAULT_LIMIT,
        }
    }

    /// Return at most `limit` recommendations
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Classifier in use
    pub fn classifier(&self) -> &CategoryClassifier {
        &self.classifier
    }

    /// Recommend models for a need statement.
    ///
    /// `factors` must not be empty.
    ///
    /// # Example
    /// ```
    /// use atlas::catalog::{fallback_models, Factor};
    /// use atlas::recommend::Recommender;
    ///
    /// let catalog = fallback_models();
    /// let picks = Recommender::default().recommend(
    ///     &catalog,
    ///     "I need help debugging my Python script",
    ///     &[Factor::Accuracy, Factor::Performance],
    /// );
    ///
    /// assert_eq!(picks.len(), 3);
    /// assert_eq!(picks[0].match_score, 99);
    /// assert_eq!(picks[2].model.id, "openai/gpt-4-turbo");
    /// assert!(picks.iter().all(|p| p.matched_categories == ["Coding & Development"]));
    /// ```
    pub fn recommend(
        &self,
        records: &[ModelRecord],
        needs: &str,
        factors: &[Factor],
    ) -> Vec<Recommendation> {
        let needed = self.classifier.classify(needs);
        self.recommend_for(records, &needed, factors)
    }

    /// Recommend models for already-classified needs
    pub fn recommend_for(
        &self,
        records: &[ModelRecord],
        needed: &[Category],
        factors: &[Factor],
    ) -> Vec<Recommendation> {
        score_models(records, needed, factors)
            .into_iter()
            .take(self.limit)
            .map(|scored| Recommendation {
                model: scored.model.clone(),
                match_score: match_percent(scored.score),
                matched_categories: scored
                    .matched
                    .iter()
                    .map(|c| c.display_name().to_string())
                    .collect(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{fallback_models, Metrics};

    fn model(id: &str, caps: &[Category], metrics: (f64, f64, f64)) -> ModelRecord {
        ModelRecord::new(id, id)
            .capabilities(caps.iter().copied())
            .metrics(Metrics::new(metrics.0, metrics.1, metrics.2))
    }

    #[test]
    fn test_score_formula() {
        let records = vec![model(
            "a",
            &[Category::Chat, Category::Coding],
            (8.0, 6.0, 10.0),
        )];
        let scored = score_models(
            &records,
            &[Category::Coding, Category::Media],
            &[Factor::Accuracy, Factor::Performance],
        );

        assert_eq!(scored.len(), 1);
        // 0.7 * 0.5 + 0.3 * (14 / 20)
        assert!((scored[0].score - 0.56).abs() < 1e-9);
        assert_eq!(scored[0].matched, vec![Category::Coding]);
        assert_eq!(match_percent(scored[0].score), 56);
    }

    #[test]
    fn test_non_matching_and_capability_less_records_skipped() {
        let records = vec![
            model("chat-only", &[Category::Chat], (9.0, 9.0, 9.0)),
            ModelRecord::new("bare", "bare"),
            model("coder", &[Category::Coding], (5.0, 5.0, 5.0)),
        ];
        let scored = score_models(&records, &[Category::Coding], &[Factor::Price]);

        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].model.id, "coder");
    }

    #[test]
    fn test_missing_metrics_score_zero_metric_part() {
        let records = vec![ModelRecord::new("m", "m").capabilities([Category::Media])];
        let scored = score_models(&records, &[Category::Media], &[Factor::Accuracy]);
        assert!((scored[0].score - CATEGORY_WEIGHT).abs() < 1e-9);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let records = vec![
            model("first", &[Category::Content], (8.0, 8.0, 8.0)),
            model("second", &[Category::Content], (8.0, 8.0, 8.0)),
            model("third", &[Category::Content], (8.0, 8.0, 8.0)),
        ];
        let recs =
            Recommender::default().recommend_for(&records, &[Category::Content], &[Factor::Price]);

        let ids: Vec<_> = recs.iter().map(|r| r.model.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_top_three_only() {
        let catalog = fallback_models();
        let recs = Recommender::default().recommend(&catalog, "chat with me", &Factor::ALL);

        assert_eq!(recs.len(), 3);
        for rec in &recs {
            assert!(rec.match_score <= 100);
            assert_eq!(rec.matched_categories, vec!["General Chat".to_string()]);
        }
        assert!(recs.windows(2).all(|w| w[0].match_score >= w[1].match_score));
    }

    #[test]
    fn test_debugging_needs_coding_models() {
        let catalog = fallback_models();
        let recs = Recommender::default().recommend(
            &catalog,
            "I need help debugging my Python script",
            &[Factor::Accuracy, Factor::Performance],
        );

        assert!(!recs.is_empty());
        for rec in &recs {
            assert!(rec.model.has_capability(Category::Coding));
            assert!(rec.match_score > 0);
            assert_eq!(rec.matched_categories, vec!["Coding & Development".to_string()]);
        }
    }

    #[test]
    fn test_no_matches_is_empty() {
        let records = vec![model("coder", &[Category::Coding], (9.0, 9.0, 9.0))];
        let recs = Recommender::default().recommend(&records, "paint a picture", &Factor::ALL);
        assert!(recs.is_empty());
    }

    #[test]
    fn test_deterministic() {
        let catalog = fallback_models();
        let recommender = Recommender::default().with_limit(10);
        let first = recommender.recommend(&catalog, "analyze and write", &[Factor::Price]);
        let second = recommender.recommend(&catalog, "analyze and write", &[Factor::Price]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_serializes_camel_case_extras() {
        let records = vec![model("a/b", &[Category::Chat], (9.0, 9.0, 9.0))];
        let recs = Recommender::default().recommend(&records, "", &[Factor::Accuracy]);
        let json = serde_json::to_value(&recs[0]).unwrap();

        assert_eq!(json["id"], "a/b");
        assert_eq!(json["matchScore"], 97);
        assert_eq!(json["matchedCategories"][0], "General Chat");
    }
}
