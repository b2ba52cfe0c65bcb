//! Telemetry configuration from environment variables.

use std::env;

/// Default service name in traces.
pub const DEFAULT_SERVICE_NAME: &str = "resource-monitor";

/// Configuration for logging and tracing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name for traces and logs
    pub service_name: String,

    /// OTLP collector endpoint; span export is off when unset
    pub otlp_endpoint: Option<String>,

    /// Log filter directive (trace, debug, info, warn, error, or a full
    /// `EnvFilter` directive)
    pub log_level: String,

    /// Emit JSON log lines instead of pretty output
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            otlp_endpoint: None,
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OTEL_SERVICE_NAME`: Service name (default: resource-monitor)
    /// - `OTEL_EXPORTER_OTLP_ENDPOINT`: OTLP endpoint (default: unset, no export)
    /// - `RM_LOG_LEVEL`: Log level (default: info). `RUST_LOG` overrides it
    ///   when the subscriber is installed.
    /// - `RM_JSON_LOGS`: Enable JSON logs (default: false in dev, true in containers)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let is_container =
            lookup("KUBERNETES_SERVICE_HOST").is_some() || lookup("DOCKER_CONTAINER").is_some();

        Self {
            service_name: lookup("OTEL_SERVICE_NAME")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string()),

            otlp_endpoint: lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|v| !v.is_empty()),

            log_level: lookup("RM_LOG_LEVEL")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| "info".to_string()),

            json_logs: lookup("RM_JSON_LOGS")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(is_container),
        }
    }
}
