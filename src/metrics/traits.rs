//! # Metrics Trait Hierarchy
//!
//! Recording, snapshotting and export are split into small traits so the
//! containers only ever talk to a recorder, and consumers only ever see
//! snapshots.
//!
//! ## Architecture
//!
//! ```text
//!                ┌─────────────────────────────┐
//!                │     CoreMetricsRecorder     │
//!                │  get_hit/get_miss/insert    │
//!                │  evict/clear                │
//!                └──────────────┬──────────────┘
//!                               │
//!                               ▼
//!                        ┌──────────────┐      ┌──────────────────────┐
//!                        │     Lru      │      │ LruMetricsReadRecorder│
//!                        │   Recorder   │      │ (&self: peek/rank)    │
//!                        └──────────────┘      └──────────────────────┘
//!
//!   ┌──────────────────────┐
//!   │ TableMetricsRecorder │   put/update/remove/rehash
//!   └──────────────────────┘
//!
//!   Consumption (decoupled from recording):
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsExporter<S>           │
//!   │ (bench/test)                 │    │ (production monitoring)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```

/// Common counters for any cache.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_clear(&mut self);
}

/// Metrics for LRU behavior (recency order).
pub trait LruMetricsRecorder: CoreMetricsRecorder {
    fn record_pop_lru_call(&mut self);
    fn record_pop_lru_found(&mut self);
    fn record_touch_call(&mut self);
    fn record_touch_found(&mut self);
}

/// Read-only LRU metrics for `&self` methods (uses interior mutability).
pub trait LruMetricsReadRecorder {
    fn record_peek_lru_call(&self);
    fn record_peek_lru_found(&self);
    fn record_recency_rank_call(&self);
    fn record_recency_rank_found(&self);
    fn record_recency_rank_scan_step(&self);
}

/// Metrics for hash table mutations.
pub trait TableMetricsRecorder {
    fn record_put(&mut self);
    fn record_update(&mut self);
    fn record_remove(&mut self);
    fn record_rehash(&mut self);
}

/// Snapshot provider for tests and benches.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Export/publish metrics to production monitoring backends.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
