//! The cache layer: one series slot, one prediction cache, one lock.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use moka::sync::Cache;
use tracing::debug;

use cadence_core::config::CacheConfig;
use cadence_core::errors::CadenceResult;
use cadence_core::traits::SeriesStore;

/// Upper bound on cached prediction entries; well above any realistic
/// user count for a single-process deployment.
const MAX_PREDICTION_ENTRIES: u64 = 10_000;

/// Whole-table series snapshot with its load timestamp.
struct SeriesSlot<R> {
    rows: Vec<R>,
    loaded_at: Option<Instant>,
}

/// TTL cache over one series store plus a per-user prediction cache.
///
/// Owns all mutable cache state explicitly: construct once per process
/// and share by reference. Every read-modify-write sequence against the
/// series (load, mutate, persist, restamp, clear predictions) runs under
/// the single series lock via [`CacheLayer::write`]; readers of a fresh
/// slot hold the lock only long enough to clone it.
///
/// Invalidation is coarse: any write drops every user's cached
/// prediction, not just the written user's.
pub struct CacheLayer<S: SeriesStore, P: Clone + Send + Sync + 'static> {
    store: S,
    series_ttl: Duration,
    series: Mutex<SeriesSlot<S::Row>>,
    predictions: Cache<i64, P>,
}

impl<S: SeriesStore, P: Clone + Send + Sync + 'static> CacheLayer<S, P> {
    /// Build from the standard config (TTLs in seconds).
    pub fn new(store: S, config: &CacheConfig) -> Self {
        Self::with_ttls(
            store,
            Duration::from_secs(config.series_ttl_secs),
            Duration::from_secs(config.prediction_ttl_secs),
        )
    }

    /// Build with explicit TTL durations.
    pub fn with_ttls(store: S, series_ttl: Duration, prediction_ttl: Duration) -> Self {
        let predictions = Cache::builder()
            .max_capacity(MAX_PREDICTION_ENTRIES)
            .time_to_live(prediction_ttl)
            .build();

        Self {
            store,
            series_ttl,
            series: Mutex::new(SeriesSlot {
                rows: Vec::new(),
                loaded_at: None,
            }),
            predictions,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The cached series when fresh, otherwise a reload through the
    /// store (which restamps the slot).
    pub fn get_series(&self) -> CadenceResult<Vec<S::Row>> {
        let mut slot = self.series.lock().expect("series lock poisoned");
        if let Some(loaded_at) = slot.loaded_at {
            if loaded_at.elapsed() < self.series_ttl {
                return Ok(slot.rows.clone());
            }
        }

        let rows = self.store.load()?;
        debug!(rows = rows.len(), "series cache refreshed from store");
        slot.rows = rows.clone();
        slot.loaded_at = Some(Instant::now());
        Ok(rows)
    }

    /// Persist `rows`, refresh the slot so the writer's own next read is
    /// never stale, and drop all cached predictions.
    pub fn put_series(&self, rows: Vec<S::Row>) -> CadenceResult<()> {
        let mut slot = self.series.lock().expect("series lock poisoned");
        self.store.save(&rows)?;
        slot.rows = rows;
        slot.loaded_at = Some(Instant::now());
        self.predictions.invalidate_all();
        debug!("series written, prediction cache cleared");
        Ok(())
    }

    /// One read-modify-write critical section: take the fresh-or-loaded
    /// rows, apply `mutate`, persist, restamp, clear all predictions.
    /// Concurrent writers serialize here. Returns the table after the
    /// write.
    pub fn write<F>(&self, mutate: F) -> CadenceResult<Vec<S::Row>>
    where
        F: FnOnce(&mut Vec<S::Row>),
    {
        let mut slot = self.series.lock().expect("series lock poisoned");

        let fresh = slot
            .loaded_at
            .is_some_and(|at| at.elapsed() < self.series_ttl);
        let mut rows = if fresh {
            slot.rows.clone()
        } else {
            self.store.load()?
        };

        mutate(&mut rows);
        self.store.save(&rows)?;
        slot.rows = rows.clone();
        slot.loaded_at = Some(Instant::now());
        self.predictions.invalidate_all();
        debug!("series written, prediction cache cleared");
        Ok(rows)
    }

    /// A cached prediction, only while younger than the prediction TTL.
    pub fn get_prediction(&self, user_id: i64) -> Option<P> {
        self.predictions.get(&user_id)
    }

    /// Cache a freshly computed prediction under `user_id`.
    pub fn put_prediction(&self, user_id: i64, value: P) {
        self.predictions.insert(user_id, value);
    }

    /// Drop every cached prediction.
    pub fn invalidate_predictions(&self) {
        self.predictions.invalidate_all();
    }
}
