//! # Resource Monitor Runtime
//!
//! Wires the subsystems together and runs the HTTP service.
//!
//! ```text
//! POST /monitor ──→ SubscriptionRegistry (rm-01)
//!                          ↑ read
//! POST /.mu/delta ──→ DeltaMatcher (rm-02) ──→ NotificationEmitter (rm-03)
//!                                                     │ one INSERT DATA
//!                                                     ↓
//!                                              SPARQL endpoint
//! ```
//!
//! ## Startup Sequence
//!
//! 1. Load and validate configuration from the environment
//! 2. Initialize telemetry
//! 3. Build the sink, registry, matcher and emitter
//! 4. Serve the gateway until Ctrl+C, then drain in-flight requests

pub mod config;

use anyhow::{Context, Result};
use rm_03_notification_emitter::{InMemorySink, NotificationSink, SparqlUpdateSink};
use rm_04_api_gateway::{ApiGatewayService, AppState};
use std::future::Future;
use std::sync::Arc;
use tracing::{info, warn};

pub use config::{RuntimeConfig, SinkTarget, MEMORY_SINK};

/// Build the notification sink selected by configuration.
pub fn build_sink(target: &SinkTarget) -> Result<Arc<dyn NotificationSink>> {
    match target {
        SinkTarget::Sparql(config) => {
            info!(endpoint = %config.endpoint, channel = %config.channel, "Using SPARQL sink");
            let sink = SparqlUpdateSink::new(config.clone())
                .context("Failed to create SPARQL sink")?;
            Ok(Arc::new(sink))
        }
        SinkTarget::Memory => {
            warn!("Using in-memory sink; push updates will not reach the triple store");
            Ok(Arc::new(InMemorySink::new()))
        }
    }
}

/// The assembled service.
pub struct MonitorRuntime {
    gateway: ApiGatewayService,
}

impl MonitorRuntime {
    /// Validate configuration and wire all subsystems.
    pub fn new(config: RuntimeConfig) -> Result<Self> {
        config.validate().context("Invalid configuration")?;

        let sink = build_sink(&config.sink)?;
        let state = AppState::with_sink(sink);
        let gateway = ApiGatewayService::new(config.gateway, state)
            .context("Failed to create API gateway")?;

        Ok(Self { gateway })
    }

    /// Serve until `shutdown` resolves.
    pub async fn run<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.gateway.config().socket_addr();
        info!(addr = %addr, "Resource monitor starting");

        self.gateway
            .start(shutdown)
            .await
            .context("HTTP server failed")?;

        info!("Resource monitor stopped");
        Ok(())
    }
}

/// Resolves on Ctrl+C.
pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, initiating graceful shutdown..."),
        Err(e) => warn!(error = %e, "Failed to listen for Ctrl+C; shutting down"),
    }
}
