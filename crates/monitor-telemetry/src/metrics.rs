//! Prometheus metrics for the resource monitor.
//!
//! All metrics follow the naming convention: `rm_<area>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Encoder, Histogram, HistogramOpts, IntCounter, IntGauge, Registry,
    TextEncoder,
};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // SUBSCRIPTION METRICS
    // =========================================================================

    /// Registrations that created a new subscription
    pub static ref SUBSCRIPTIONS_REGISTERED: IntCounter = IntCounter::new(
        "rm_subscriptions_registered_total",
        "Total subscriptions created"
    ).expect("metric creation failed");

    /// Subscriptions removed, one by one or per tab
    pub static ref SUBSCRIPTIONS_UNREGISTERED: IntCounter = IntCounter::new(
        "rm_subscriptions_unregistered_total",
        "Total subscriptions removed"
    ).expect("metric creation failed");

    /// Live subscriptions
    pub static ref SUBSCRIPTIONS_ACTIVE: IntGauge = IntGauge::new(
        "rm_subscriptions_active",
        "Number of currently registered (tab, pattern) pairs"
    ).expect("metric creation failed");

    // =========================================================================
    // DELTA METRICS
    // =========================================================================

    /// Delta batches received
    pub static ref DELTAS_RECEIVED: IntCounter = IntCounter::new(
        "rm_deltas_received_total",
        "Total delta batches received"
    ).expect("metric creation failed");

    /// Quads matched against the index
    pub static ref QUADS_PROCESSED: IntCounter = IntCounter::new(
        "rm_quads_processed_total",
        "Total inserted and deleted quads processed"
    ).expect("metric creation failed");

    /// Notification records produced by matching
    pub static ref NOTIFICATIONS_MATCHED: IntCounter = IntCounter::new(
        "rm_notifications_matched_total",
        "Total notification records produced by matching"
    ).expect("metric creation failed");

    // =========================================================================
    // EMISSION METRICS
    // =========================================================================

    /// Push messages written to the sink
    pub static ref NOTIFICATIONS_EMITTED: IntCounter = IntCounter::new(
        "rm_notifications_emitted_total",
        "Total push messages stored by the sink"
    ).expect("metric creation failed");

    /// Failed sink writes
    pub static ref SINK_FAILURES: IntCounter = IntCounter::new(
        "rm_sink_failures_total",
        "Total failed sink writes"
    ).expect("metric creation failed");

    /// Emission duration
    pub static ref EMIT_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "rm_emit_duration_seconds",
            "Time spent writing a notification batch to the sink"
        ).buckets(exponential_buckets(0.001, 2.0, 14).expect("valid buckets"))
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry.
///
/// Calling it again is harmless.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        // Subscriptions
        Box::new(SUBSCRIPTIONS_REGISTERED.clone()),
        Box::new(SUBSCRIPTIONS_UNREGISTERED.clone()),
        Box::new(SUBSCRIPTIONS_ACTIVE.clone()),
        // Deltas
        Box::new(DELTAS_RECEIVED.clone()),
        Box::new(QUADS_PROCESSED.clone()),
        Box::new(NOTIFICATIONS_MATCHED.clone()),
        // Emission
        Box::new(NOTIFICATIONS_EMITTED.clone()),
        Box::new(SINK_FAILURES.clone()),
        Box::new(EMIT_DURATION.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(())
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Content type of [`encode_metrics`] output.
pub fn metrics_content_type() -> String {
    TextEncoder::new().format_type().to_string()
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        self.histogram.observe(self.start.elapsed().as_secs_f64());
    }
}
