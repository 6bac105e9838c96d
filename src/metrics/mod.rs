//! Metrics for the scoring service
//!
//! Prometheus counters and histograms for submissions, resolver runs,
//! standings requests and store retries.

pub mod collector;

pub use collector::{
    MetricsCollector, MetricsTimer, PerformanceMetrics, ScoringMetrics, StoreMetrics,
};
