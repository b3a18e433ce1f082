//! # Model Atlas - AI Model Catalog
//!
//! A catalog of AI models with upstream fetch and fallback, metadata
//! enhancement, category browsing, search, and needs-based recommendations.
//!
//! ## Features
//!
//! - **Catalog store**: fetches the listing from an OpenRouter-compatible API,
//!   falls back to a built-in list of well-known models on any failure
//! - **Enhancement**: fills in missing provider, capability tags and metrics
//! - **Recommendations**: classifies a free-text need into categories and
//!   ranks models by category coverage and selected metrics
//! - **Browsing**: category filter, case-insensitive search, pagination,
//!   strengths and price display text
//! - **HTTP server**: Axum-based API with an upstream listing proxy
//!
//! ### Architecture
//!
//! ```text
//! Upstream API ──fetch──> CatalogStore ──enhance──> CatalogSnapshot
//!      │ (error/empty)          ^                        │
//!      └──> fallback list ──────┘          ┌─────────────┴─────────────┐
//!                                          v                           v
//!                              CategoryClassifier + scorer       query layer
//!                                  (recommend)               (filter/search/page)
//! ```
//!
//! ### Categories
//!
//! | Tag               | Display name          |
//! |-------------------|-----------------------|
//! | `coding`          | Coding & Development  |
//! | `chat`            | General Chat          |
//! | `problem-solving` | Problem Solving       |
//! | `it-support`      | IT Support            |
//! | `content`         | Content Creation      |
//! | `media`           | Media Generation      |
//!
//! ## Quick Start
//!
//! ```rust
//! use atlas::catalog::{CatalogStore, Factor, StaticSource};
//! use atlas::query::{format_price, search};
//! use atlas::recommend::Recommender;
//!
//! # tokio_test::block_on(async {
//! let store = CatalogStore::new(StaticSource::empty()).with_seed(1);
//! let snapshot = store.load().await;
//!
//! let hits = search(snapshot.records(), "gpt-4o");
//! assert_eq!(format_price(hits[0]), "$0.0050/$0.0150 per 1K tokens");
//!
//! let picks = Recommender::default().recommend(
//!     snapshot.records(),
//!     "generate an image for my blog",
//!     &[Factor::Price],
//! );
//! assert!(!picks.is_empty());
//! # });
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Records, sources, enhancement and the snapshot store
//! - [`recommend`]: Need classification and recommendation scoring
//! - [`query`]: Filtering, search, pagination and display text
//! - [`server`]: HTTP API server (Axum-based)
//! - [`config`]: Configuration management
//! - [`error`]: Error types and result aliases

pub mod catalog;
pub mod config;
pub mod error;
pub mod query;
pub mod recommend;
pub mod server;

// Re-exports for convenience
pub use catalog::{
    CatalogOrigin, CatalogSnapshot, CatalogSource, CatalogStore, Category, CategoryFilter,
    Enhancer, Factor, HttpSource, Metrics, ModelRecord, Pricing, StaticSource,
};
pub use config::Config;
pub use error::{AtlasError, Result};
pub use query::{by_category, format_price, paginate, search, strengths_of, Page};
pub use recommend::{CategoryClassifier, Recommendation, Recommender};
pub use server::{AppState, ServerConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
