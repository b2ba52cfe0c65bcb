//! Resource monitor entry point.

use anyhow::{Context, Result};
use monitor_runtime::{shutdown_signal, MonitorRuntime, RuntimeConfig};
use monitor_telemetry::init_telemetry;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = RuntimeConfig::from_env().context("Failed to read configuration")?;

    let _telemetry = init_telemetry(config.telemetry.clone())
        .await
        .context("Failed to initialize telemetry")?;

    info!("===========================================");
    info!("  Resource Monitor v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    MonitorRuntime::new(config)?.run(shutdown_signal()).await
}
