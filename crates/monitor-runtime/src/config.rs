//! # Runtime Configuration
//!
//! Everything the service reads from its environment, gathered in one
//! place and validated before any subsystem starts.

use monitor_telemetry::TelemetryConfig;
use rm_03_notification_emitter::{SparqlSinkConfig, DEFAULT_SPARQL_ENDPOINT, PUSH_CHANNEL};
use rm_04_api_gateway::domain::config::parse_var;
use rm_04_api_gateway::{ConfigError, GatewayConfig};
use std::env;
use std::time::Duration;

/// `MU_SPARQL_ENDPOINT` value selecting the in-memory sink.
pub const MEMORY_SINK: &str = "memory:";

/// Where push updates go.
#[derive(Debug, Clone)]
pub enum SinkTarget {
    /// SPARQL endpoint of the triple store
    Sparql(SparqlSinkConfig),
    /// Kept in process memory; for local runs without a triple store
    Memory,
}

/// Complete service configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub gateway: GatewayConfig,
    pub sink: SinkTarget,
    pub telemetry: TelemetryConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            gateway: GatewayConfig::default(),
            sink: SinkTarget::Sparql(SparqlSinkConfig::default()),
            telemetry: TelemetryConfig::default(),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// Sink variables:
    /// - `MU_SPARQL_ENDPOINT` (default `http://database:8890/sparql`, or `memory:`)
    /// - `RM_PUSH_CHANNEL` (default `http://services.semantic.works/resource-monitor`)
    /// - `RM_SINK_TIMEOUT_SECS` (default `30`)
    /// - `RM_SINK_CONNECT_TIMEOUT_SECS` (default `5`)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = lookup("MU_SPARQL_ENDPOINT")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SPARQL_ENDPOINT.to_string());

        let sink = if endpoint.trim() == MEMORY_SINK {
            SinkTarget::Memory
        } else {
            let defaults = SparqlSinkConfig::default();
            SinkTarget::Sparql(SparqlSinkConfig {
                endpoint,
                channel: lookup("RM_PUSH_CHANNEL")
                    .filter(|v| !v.trim().is_empty())
                    .unwrap_or_else(|| PUSH_CHANNEL.to_string()),
                timeout: parse_var(&lookup, "RM_SINK_TIMEOUT_SECS")?
                    .map(Duration::from_secs)
                    .unwrap_or(defaults.timeout),
                connect_timeout: parse_var(&lookup, "RM_SINK_CONNECT_TIMEOUT_SECS")?
                    .map(Duration::from_secs)
                    .unwrap_or(defaults.connect_timeout),
            })
        };

        Ok(Self {
            gateway: GatewayConfig::from_lookup(&lookup)?,
            sink,
            telemetry: TelemetryConfig::from_lookup(&lookup),
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.gateway.validate()?;

        if let SinkTarget::Sparql(sink) = &self.sink {
            if !(sink.endpoint.starts_with("http://") || sink.endpoint.starts_with("https://")) {
                return Err(ConfigError::Invalid(format!(
                    "MU_SPARQL_ENDPOINT must be an http(s) URL or {MEMORY_SINK}, got {:?}",
                    sink.endpoint
                )));
            }
            if sink.timeout.is_zero() || sink.connect_timeout.is_zero() {
                return Err(ConfigError::InvalidTimeout(
                    "sink timeouts cannot be 0".into(),
                ));
            }
        }

        Ok(())
    }
}
