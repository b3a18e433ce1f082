//! Enhancement: the one-time pass that fills in missing record metadata.
//!
//! Only absent fields are touched, so running the pass over an already
//! enhanced list is a no-op.

use rand::Rng;

use super::category::Category;
use super::record::{Metrics, ModelRecord, UNKNOWN_PROVIDER};
use super::tables::{InferenceTables, RuleScope};

/// Lower bound for backfilled metrics
pub const METRIC_FLOOR: f64 = 7.0;

/// Upper bound for backfilled metrics
pub const METRIC_CEILING: f64 = 9.5;

/// Fills in provider, capabilities and metrics
#[derive(Debug, Clone, Default)]
pub struct Enhancer {
    tables: InferenceTables,
}

impl Enhancer {
    /// Create an enhancer with custom tables
    pub fn new(tables: InferenceTables) -> Self {
        Self { tables }
    }

    /// Enhance every record in place.
    ///
    /// Returns how many records needed at least one field filled.
    pub fn enhance<R: Rng + ?Sized>(&self, records: &mut [ModelRecord], rng: &mut R) -> usize {
        let mut touched = 0;

        for record in records.iter_mut() {
            let mut changed = false;

            if record.metrics.is_none() {
                record.metrics = Some(random_metrics(rng));
                changed = true;
            }

            if record.capability_list().is_empty() {
                record.capabilities = Some(self.infer_capabilities(record));
                changed = true;
            }

            if record.provider.is_none() {
                record.provider = Some(self.infer_provider(record));
                changed = true;
            }

            if changed {
                touched += 1;
            }
        }

        touched
    }

    /// Infer capabilities from name and description.
    ///
    /// Always includes chat; every rule whose keywords appear in its scoped
    /// text adds its category. The result is in canonical category order.
    pub fn infer_capabilities(&self, record: &ModelRecord) -> Vec<Category> {
        let name = record.name.to_lowercase();
        let description = record.description.as_deref().unwrap_or("").to_lowercase();
        let both = format!("{name} {description}");

        Category::ALL
            .into_iter()
            .filter(|category| {
                *category == Category::Chat
                    || self.tables.capabilities.iter().any(|rule| {
                        let haystack = match rule.scope {
                            RuleScope::Name => &name,
                            RuleScope::Description => &description,
                            RuleScope::Both => &both,
                        };
                        rule.category == *category
                            && rule.keywords.iter().any(|k| haystack.contains(k.as_str()))
                    })
            })
            .collect()
    }

    /// Infer the provider from id or name; first vendor rule that matches wins
    pub fn infer_provider(&self, record: &ModelRecord) -> String {
        let id = record.id.to_lowercase();
        let name = record.name.to_lowercase();

        self.tables
            .vendors
            .iter()
            .find(|rule| {
                rule.keywords
                    .iter()
                    .any(|k| id.contains(k.as_str()) || name.contains(k.as_str()))
            })
            .map(|rule| rule.provider.clone())
            .unwrap_or_else(|| UNKNOWN_PROVIDER.to_string())
    }
}

/// Three independent metrics in [7.0, 9.5], one decimal
pub fn random_metrics<R: Rng + ?Sized>(rng: &mut R) -> Metrics {
    Metrics::new(random_metric(rng), random_metric(rng), random_metric(rng))
}

fn random_metric<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let value = rng.gen_range(METRIC_FLOOR..=METRIC_CEILING);
    (value * 10.0).round() / 10.0
}
