//! Catalog store: owns the current snapshot and knows how to refresh it.
//!
//! The store keeps two things:
//! 1. A source to fetch live records from
//! 2. The latest snapshot, an immutable `Arc` swapped on every load
//!
//! Readers clone the `Arc` and keep iterating their snapshot while a refresh
//! installs a new one. A load never fails: fetch errors and empty listings
//! both yield the fallback list.

use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::enhance::Enhancer;
use super::fallback::fallback_models;
use super::record::ModelRecord;
use super::source::CatalogSource;

/// Where a snapshot's records came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogOrigin {
    /// Fetched from the source
    Live,
    /// The built-in fallback list
    Fallback,
}

/// One load's worth of enhanced records
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    records: Vec<ModelRecord>,
    origin: CatalogOrigin,
    loaded_at: DateTime<Utc>,
}

impl CatalogSnapshot {
    /// Records in catalog order
    pub fn records(&self) -> &[ModelRecord] {
        &self.records
    }

    /// Where the records came from
    pub fn origin(&self) -> CatalogOrigin {
        self.origin
    }

    /// When the snapshot was built
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the snapshot is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Find a record by ID
    pub fn get(&self, id: &str) -> Option<&ModelRecord> {
        self.records.iter().find(|record| record.id == id)
    }
}

/// Owns the catalog state for an application
pub struct CatalogStore {
    source: Box<dyn CatalogSource>,
    enhancer: Enhancer,
    fallback: Vec<ModelRecord>,
    rng: Mutex<StdRng>,
    current: RwLock<Arc<CatalogSnapshot>>,
}

impl CatalogStore {
    /// Create a store over a source.
    ///
    /// Until the first load, `current()` is the fallback list.
    pub fn new(source: impl CatalogSource + 'static) -> Self {
        let mut store = Self {
            source: Box::new(source),
            enhancer: Enhancer::default(),
            fallback: fallback_models(),
            rng: Mutex::new(StdRng::from_entropy()),
            current: RwLock::new(Arc::new(CatalogSnapshot {
                records: Vec::new(),
                origin: CatalogOrigin::Fallback,
                loaded_at: Utc::now(),
            })),
        };
        store.reset_to_fallback();
        store
    }

    /// Use custom inference tables
    pub fn with_enhancer(mut self, enhancer: Enhancer) -> Self {
        self.enhancer = enhancer;
        self.reset_to_fallback();
        self
    }

    /// Seed the metric backfill so enhancement is reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self.reset_to_fallback();
        self
    }

    /// Replace the fallback list
    pub fn with_fallback(mut self, records: Vec<ModelRecord>) -> Self {
        self.fallback = records;
        self.reset_to_fallback();
        self
    }

    /// Source name
    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// The latest snapshot
    pub fn current(&self) -> Arc<CatalogSnapshot> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Find a record in the latest snapshot
    pub fn get(&self, id: &str) -> Option<ModelRecord> {
        self.current().get(id).cloned()
    }

    /// Fetch, enhance and install a new snapshot.
    ///
    /// Falls back to the built-in list when the source errors or returns
    /// nothing.
    pub async fn load(&self) -> Arc<CatalogSnapshot> {
        let (records, origin) = match self.source.fetch().await {
            Ok(records) if !records.is_empty() => {
                tracing::info!(
                    source = self.source.name(),
                    count = records.len(),
                    "fetched catalog"
                );
                (records, CatalogOrigin::Live)
            },
            Ok(_) => {
                tracing::warn!(
                    source = self.source.name(),
                    "source returned no models, using fallback list"
                );
                (self.fallback.clone(), CatalogOrigin::Fallback)
            },
            Err(e) => {
                tracing::warn!(
                    source = self.source.name(),
                    error = %e,
                    "catalog fetch failed, using fallback list"
                );
                (self.fallback.clone(), CatalogOrigin::Fallback)
            },
        };

        let snapshot = Arc::new(self.build_snapshot(records, origin));
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&snapshot);
        snapshot
    }

    /// Reload on a fixed interval until the task is aborted.
    ///
    /// The first reload happens one full `period` after spawning. Runs
    /// independently of manual `load()` calls; whichever finishes last wins.
    pub fn spawn_auto_refresh(self: Arc<Self>, period: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let snapshot = self.load().await;
                tracing::debug!(
                    origin = ?snapshot.origin(),
                    count = snapshot.len(),
                    "auto-refresh complete"
                );
            }
        })
    }

    fn build_snapshot(&self, mut records: Vec<ModelRecord>, origin: CatalogOrigin) -> CatalogSnapshot {
        let enhanced = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            self.enhancer.enhance(&mut records, &mut *rng)
        };
        tracing::debug!(enhanced, total = records.len(), "enhanced catalog records");

        CatalogSnapshot {
            records,
            origin,
            loaded_at: Utc::now(),
        }
    }

    fn reset_to_fallback(&mut self) {
        let snapshot = self.build_snapshot(self.fallback.clone(), CatalogOrigin::Fallback);
        *self.current.get_mut().unwrap_or_else(PoisonError::into_inner) = Arc::new(snapshot);
    }
}
