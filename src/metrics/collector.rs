//! Metrics collection using Prometheus
//!
//! Counts submissions and resolved results, times the resolver and the
//! standings aggregation, and tracks store retries.

use crate::types::ResultStatus;
use anyhow::Result;
use prometheus::{
    Encoder, Histogram, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry,
    TextEncoder,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Main metrics collector for the scoring service
#[derive(Clone)]
pub struct MetricsCollector {
    /// Prometheus registry
    registry: Arc<Registry>,

    /// Submission and standings metrics
    scoring_metrics: ScoringMetrics,

    /// Store access metrics
    store_metrics: StoreMetrics,

    /// Performance metrics
    performance_metrics: PerformanceMetrics,
}

#[derive(Clone)]
pub struct ScoringMetrics {
    /// Results submissions by outcome
    pub submissions_total: IntCounterVec,

    /// Ranked results produced, by status
    pub results_resolved_total: IntCounterVec,

    /// Finishers that shared a position with someone else
    pub tied_finishers_total: IntCounter,

    /// Standings views computed
    pub standings_requests_total: IntCounterVec,
}

#[derive(Clone)]
pub struct StoreMetrics {
    /// Store reads retried after a failure
    pub retries_total: IntCounterVec,

    /// Store operations that failed for good
    pub errors_total: IntCounterVec,
}

#[derive(Clone)]
pub struct PerformanceMetrics {
    /// Time spent resolving one event's outcomes
    pub resolve_duration: Histogram,

    /// Time spent building standings views
    pub aggregation_duration: HistogramVec,
}

impl MetricsCollector {
    /// Create a new metrics collector with default registry
    pub fn new() -> Result<Self> {
        let registry = Arc::new(Registry::new());
        Self::with_registry(registry)
    }

    /// Create a new metrics collector with custom registry
    pub fn with_registry(registry: Arc<Registry>) -> Result<Self> {
        let scoring_metrics = ScoringMetrics::new(&registry)?;
        let store_metrics = StoreMetrics::new(&registry)?;
        let performance_metrics = PerformanceMetrics::new(&registry)?;

        Ok(Self {
            registry,
            scoring_metrics,
            store_metrics,
            performance_metrics,
        })
    }

    pub fn registry(&self) -> Arc<Registry> {
        self.registry.clone()
    }

    pub fn scoring(&self) -> &ScoringMetrics {
        &self.scoring_metrics
    }

    pub fn store(&self) -> &StoreMetrics {
        &self.store_metrics
    }

    pub fn performance(&self) -> &PerformanceMetrics {
        &self.performance_metrics
    }

    /// Record a submission attempt
    pub fn record_submission(&self, success: bool) {
        let status = if success { "success" } else { "error" };
        self.scoring_metrics
            .submissions_total
            .with_label_values(&[status])
            .inc();
    }

    /// Record one resolver run
    pub fn record_resolution(&self, statuses: &[ResultStatus], tied: usize, duration: Duration) {
        for status in statuses {
            self.scoring_metrics
                .results_resolved_total
                .with_label_values(&[status.as_str()])
                .inc();
        }
        self.scoring_metrics
            .tied_finishers_total
            .inc_by(tied as u64);
        self.performance_metrics
            .resolve_duration
            .observe(duration.as_secs_f64());
    }

    /// Record a standings view being built
    pub fn record_aggregation(&self, view: &str, duration: Duration) {
        self.scoring_metrics
            .standings_requests_total
            .with_label_values(&[view])
            .inc();
        self.performance_metrics
            .aggregation_duration
            .with_label_values(&[view])
            .observe(duration.as_secs_f64());
    }

    pub fn record_store_retry(&self, operation: &str) {
        self.store_metrics
            .retries_total
            .with_label_values(&[operation])
            .inc();
    }

    pub fn record_store_error(&self, operation: &str) {
        self.store_metrics
            .errors_total
            .with_label_values(&[operation])
            .inc();
    }

    /// Render all metrics in the Prometheus text exposition format
    pub fn render(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    /// Create a timer for measuring operation duration
    pub fn start_timer(&self) -> MetricsTimer {
        MetricsTimer::new()
    }
}

/// Timer for measuring operation durations
pub struct MetricsTimer {
    start: Instant,
}

impl MetricsTimer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop the timer and return the duration
    pub fn stop(self) -> Duration {
        self.elapsed()
    }
}

impl ScoringMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let submissions_total = IntCounterVec::new(
            Opts::new(
                "gala_scoreboard_submissions_total",
                "Results submissions processed",
            ),
            &["status"],
        )?;
        registry.register(Box::new(submissions_total.clone()))?;

        let results_resolved_total = IntCounterVec::new(
            Opts::new(
                "gala_scoreboard_results_resolved_total",
                "Ranked results produced by the resolver",
            ),
            &["status"],
        )?;
        registry.register(Box::new(results_resolved_total.clone()))?;

        let tied_finishers_total = IntCounter::new(
            "gala_scoreboard_tied_finishers_total",
            "Finishers sharing a position with another finisher",
        )?;
        registry.register(Box::new(tied_finishers_total.clone()))?;

        let standings_requests_total = IntCounterVec::new(
            Opts::new(
                "gala_scoreboard_standings_requests_total",
                "Standings views computed",
            ),
            &["view"],
        )?;
        registry.register(Box::new(standings_requests_total.clone()))?;

        Ok(Self {
            submissions_total,
            results_resolved_total,
            tied_finishers_total,
            standings_requests_total,
        })
    }
}

impl StoreMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let retries_total = IntCounterVec::new(
            Opts::new("gala_scoreboard_store_retries_total", "Store reads retried"),
            &["operation"],
        )?;
        registry.register(Box::new(retries_total.clone()))?;

        let errors_total = IntCounterVec::new(
            Opts::new(
                "gala_scoreboard_store_errors_total",
                "Store operations that failed",
            ),
            &["operation"],
        )?;
        registry.register(Box::new(errors_total.clone()))?;

        Ok(Self {
            retries_total,
            errors_total,
        })
    }
}

impl PerformanceMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let resolve_duration = Histogram::with_opts(
            HistogramOpts::new(
                "gala_scoreboard_resolve_duration_seconds",
                "Time to resolve positions and points for one event",
            )
            .buckets(vec![0.00001, 0.0001, 0.001, 0.005, 0.01, 0.05, 0.1]),
        )?;
        registry.register(Box::new(resolve_duration.clone()))?;

        let aggregation_duration = HistogramVec::new(
            HistogramOpts::new(
                "gala_scoreboard_aggregation_duration_seconds",
                "Time to build a standings view",
            )
            .buckets(vec![0.0001, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0]),
            &["view"],
        )?;
        registry.register(Box::new(aggregation_duration.clone()))?;

        Ok(Self {
            resolve_duration,
            aggregation_duration,
        })
    }
}
