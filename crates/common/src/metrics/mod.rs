//! Metrics and observability utilities
//!
//! Records through the `metrics` facade; the embedding application
//! decides which exporter (if any) is installed.

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram, Unit};
use std::time::Instant;

/// Metrics prefix for all CreditForge metrics
pub const METRICS_PREFIX: &str = "creditforge";

/// Register all metric descriptions
pub fn register_metrics() {
    // Allocation metrics
    describe_counter!(
        format!("{}_allocations_total", METRICS_PREFIX),
        Unit::Count,
        "Total per-article credit allocations"
    );

    describe_histogram!(
        format!("{}_allocation_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Per-article allocation latency in seconds"
    );

    // Solver metrics
    describe_histogram!(
        format!("{}_solver_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Intrinsic credit solve latency in seconds"
    );

    // Graph metrics
    describe_gauge!(
        format!("{}_graph_articles", METRICS_PREFIX),
        Unit::Count,
        "Articles in the most recently built citation graph"
    );

    describe_gauge!(
        format!("{}_graph_authors", METRICS_PREFIX),
        Unit::Count,
        "Authors in the most recently built citation graph"
    );

    describe_counter!(
        format!("{}_graph_dropped_edges_total", METRICS_PREFIX),
        Unit::Count,
        "Edges dropped during graph construction"
    );

    tracing::info!("Metrics registered");
}

/// Helper to record one allocation
pub struct AllocationMetrics {
    start: Instant,
    policy: &'static str,
}

impl AllocationMetrics {
    /// Start tracking an allocation
    pub fn start(policy: &'static str) -> Self {
        Self {
            start: Instant::now(),
            policy,
        }
    }

    /// Record allocation completion with its outcome label
    pub fn finish(self, status: &'static str) {
        let duration = self.start.elapsed().as_secs_f64();

        counter!(
            format!("{}_allocations_total", METRICS_PREFIX),
            "policy" => self.policy,
            "status" => status
        )
        .increment(1);

        histogram!(
            format!("{}_allocation_duration_seconds", METRICS_PREFIX),
            "policy" => self.policy
        )
        .record(duration);
    }
}

/// Helper to record an intrinsic solve
pub fn record_solve(duration_secs: f64, articles: usize, authors: usize) {
    histogram!(format!("{}_solver_duration_seconds", METRICS_PREFIX)).record(duration_secs);

    tracing::debug!(articles, authors, duration_secs, "Recorded solver metrics");
}

/// Helper to record graph construction
pub fn record_graph(articles: usize, authors: usize, dropped_edges: usize) {
    gauge!(format!("{}_graph_articles", METRICS_PREFIX)).set(articles as f64);
    gauge!(format!("{}_graph_authors", METRICS_PREFIX)).set(authors as f64);
    counter!(format!("{}_graph_dropped_edges_total", METRICS_PREFIX)).increment(dropped_edges as u64);
}
