mod singleton;

use anyhow::Result;
use calplus_core::config::PlannerConfig;
use calplus_server::AppState;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = PlannerConfig::load()?;
    let data_file = config.data_path();

    // Ensure only one instance writes this data file
    let _lock = singleton::acquire_lock(&config.lock_path())?;

    let app = calplus_server::app(AppState::new(&data_file));

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    tracing::info!(data_file = %data_file.display(), "calplus-server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
