//! Model catalog: records, categories, sources and the snapshot store.
//!
//! This module provides:
//! - `ModelRecord` and its pricing/metrics types
//! - `Category`, the six capability/need tags
//! - Sources (`HttpSource`, `StaticSource`) behind the `CatalogSource` trait
//! - `Enhancer`, which fills in missing provider, capabilities and metrics
//! - `CatalogStore`, which owns the current `CatalogSnapshot`
//!
//! # Example
//!
//! ```
//! use atlas::catalog::{CatalogOrigin, CatalogStore, StaticSource};
//!
//! # tokio_test::block_on(async {
//! // An empty source always yields the built-in fallback list
//! let store = CatalogStore::new(StaticSource::empty()).with_seed(7);
//! let snapshot = store.load().await;
//!
//! assert_eq!(snapshot.origin(), CatalogOrigin::Fallback);
//! assert!(snapshot.get("openai/gpt-4o").is_some());
//! # });
//! ```

mod category;
mod enhance;
mod fallback;
mod record;
mod source;
mod store;
mod tables;

pub use category::{Category, CategoryFilter};
pub use enhance::{random_metrics, Enhancer, METRIC_CEILING, METRIC_FLOOR};
pub use fallback::{fallback_by_id, fallback_models, FallbackModel, FallbackPrice, FALLBACK_MODELS};
pub use record::{Factor, Metrics, ModelRecord, Pricing, UNKNOWN_PROVIDER};
pub use source::{parse_listing, parse_records, CatalogSource, HttpSource, ListingEnvelope, StaticSource};
pub use store::{CatalogOrigin, CatalogSnapshot, CatalogStore};
pub use tables::{
    default_capability_rules, default_vendor_rules, CapabilityRule, InferenceTables, RuleScope,
    VendorRule,
};
