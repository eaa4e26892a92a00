//! Optional operation counters, enabled with the `metrics` feature.
//!
//! Containers own a recorder (`LruMetrics`, `TableMetrics`) and expose
//! copyable snapshots through [`traits::MetricsSnapshotProvider`]. Snapshots
//! can be published with [`exporter::PrometheusTextExporter`].

pub mod cell;
pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
