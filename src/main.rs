use anyhow::{anyhow, Context};
use tracing_subscriber::EnvFilter;

use daqboard::{run_dashboard, DashboardConfig};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("daqboard=info")))
        .init();

    let config = DashboardConfig::load().context("loading dashboard config")?;
    tracing::info!(server = %config.server, "starting dashboard");

    // Socket reader and control calls run here; the UI owns the main thread.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .thread_name("daqboard-io")
        .build()
        .context("building tokio runtime")?;

    run_dashboard(config, runtime.handle().clone()).map_err(|e| anyhow!("window closed with error: {e}"))
}
