//! Metrics and observability utilities
//!
//! Prometheus-compatible metrics for the publication store, recorded
//! through the `metrics` facade. Without an installed recorder every call
//! is a no-op.

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use std::time::Instant;

/// Metrics prefix for all CiteShelf metrics
pub const METRICS_PREFIX: &str = "citeshelf";

/// Register all metric descriptions
pub fn register_metrics() {
    describe_counter!(
        format!("{}_publications_created_total", METRICS_PREFIX),
        Unit::Count,
        "Total publications created through the API"
    );

    describe_counter!(
        format!("{}_publications_imported_total", METRICS_PREFIX),
        Unit::Count,
        "Total publications created from a DOI import"
    );

    describe_counter!(
        format!("{}_publications_deleted_total", METRICS_PREFIX),
        Unit::Count,
        "Total delete requests that removed a publication"
    );

    describe_counter!(
        format!("{}_store_errors_total", METRICS_PREFIX),
        Unit::Count,
        "Total failed store operations"
    );

    describe_histogram!(
        format!("{}_store_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Store operation latency in seconds"
    );

    tracing::info!("Metrics registered");
}

/// Times a single store operation
pub struct StoreTimer {
    start: Instant,
    operation: &'static str,
}

impl StoreTimer {
    /// Start timing an operation
    pub fn start(operation: &'static str) -> Self {
        Self {
            start: Instant::now(),
            operation,
        }
    }

    /// Record completion
    pub fn finish(self, success: bool) {
        let duration = self.start.elapsed().as_secs_f64();

        histogram!(
            format!("{}_store_duration_seconds", METRICS_PREFIX),
            "operation" => self.operation
        )
        .record(duration);

        if !success {
            counter!(
                format!("{}_store_errors_total", METRICS_PREFIX),
                "operation" => self.operation
            )
            .increment(1);
        }
    }
}

pub fn record_created() {
    counter!(format!("{}_publications_created_total", METRICS_PREFIX)).increment(1);
}

pub fn record_imported() {
    counter!(format!("{}_publications_imported_total", METRICS_PREFIX)).increment(1);
}

pub fn record_deleted() {
    counter!(format!("{}_publications_deleted_total", METRICS_PREFIX)).increment(1);
}
