//! API Gateway service: binds the listener and serves until shutdown.

use axum::Router;
use std::future::Future;
use tokio::net::TcpListener;
use tracing::info;

use crate::domain::{GatewayConfig, GatewayError};
use crate::router::{build_router, AppState};

/// API Gateway service
pub struct ApiGatewayService {
    config: GatewayConfig,
    state: AppState,
}

impl ApiGatewayService {
    /// Create a new API Gateway service
    pub fn new(config: GatewayConfig, state: AppState) -> Result<Self, GatewayError> {
        config.validate()?;
        monitor_telemetry::register_metrics().map_err(|e| GatewayError::Metrics(e.to_string()))?;

        Ok(Self { config, state })
    }

    #[must_use]
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Router with all routes and middleware.
    pub fn router(&self) -> Router {
        build_router(self.state.clone(), &self.config)
    }

    /// Bind the configured address and serve until `shutdown` resolves.
    pub async fn start<F>(self, shutdown: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.socket_addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| GatewayError::Bind(format!("{addr}: {e}")))?;

        self.serve(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    ///
    /// In-flight requests finish before this returns.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let router = self.router();
        let addr = listener
            .local_addr()
            .map_err(|e| GatewayError::Bind(e.to_string()))?;

        info!(addr = %addr, "Starting HTTP server");
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| GatewayError::Server(e.to_string()))?;

        info!("HTTP server stopped");
        Ok(())
    }
}
