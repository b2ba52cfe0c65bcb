//! # Monitor Telemetry
//!
//! Logging, tracing and metrics for the resource monitor.
//!
//! ## Components
//!
//! - **Logs**: `tracing-subscriber` fmt layer, pretty or JSON
//! - **Traces**: optional OpenTelemetry OTLP export
//! - **Metrics**: Prometheus counters, gauges and histograms, scraped
//!   through the gateway's `/metrics` route
//!
//! ## Usage
//!
//! ```rust,ignore
//! use monitor_telemetry::{init_telemetry, TelemetryConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = TelemetryConfig::from_env();
//!     let _guard = init_telemetry(config).await.expect("Failed to init telemetry");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_EXPORTER_OTLP_ENDPOINT` | unset | OTLP collector; export is off when unset |
//! | `OTEL_SERVICE_NAME` | `resource-monitor` | Service name in traces |
//! | `RM_LOG_LEVEL` | `info` | Log level filter (`RUST_LOG` overrides) |
//! | `RM_JSON_LOGS` | `true` in containers | JSON log output |

mod config;
pub mod metrics;
mod tracing_setup;

pub use config::{TelemetryConfig, DEFAULT_SERVICE_NAME};
pub use metrics::{
    encode_metrics, metrics_content_type, register_metrics, HistogramTimer, DELTAS_RECEIVED,
    EMIT_DURATION, NOTIFICATIONS_EMITTED, NOTIFICATIONS_MATCHED, QUADS_PROCESSED, SINK_FAILURES,
    SUBSCRIPTIONS_ACTIVE, SUBSCRIPTIONS_REGISTERED, SUBSCRIPTIONS_UNREGISTERED,
};
pub use tracing_setup::TracingGuard;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize tracing: {0}")]
    TracerInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize metrics and the global tracing subscriber.
///
/// Returns a guard that must be held for the lifetime of the application.
/// When dropped, it flushes pending spans.
pub async fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    register_metrics()?;
    let tracing_guard = tracing_setup::init_tracing(&config).await?;

    Ok(TelemetryGuard {
        _tracing: tracing_guard,
    })
}

/// Guard that keeps telemetry active. Drop to flush and shutdown.
pub struct TelemetryGuard {
    _tracing: TracingGuard,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!("Shutting down telemetry...");
    }
}
