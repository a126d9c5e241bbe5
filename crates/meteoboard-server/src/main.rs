use std::net::SocketAddr;

use anyhow::{Context, Result};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    // Observability
    meteoboard_obs::init("meteoboard");

    // Config
    let cfg = meteoboard_config::AppConfig::load().unwrap_or_default();
    let csv_path = cfg.csv_path();
    let http_bind = cfg.http_bind();

    // Load the dataset once; nothing can be served without it
    let dataset = meteoboard_ingest::load_csv(&csv_path)
        .with_context(|| format!("failed to load observations from '{}'", csv_path.display()))?;
    tracing::info!(records = dataset.len(), path = %csv_path.display(), "dataset loaded");

    // Build app and state
    let (app, state) = meteoboard_server::build_app(dataset);

    // Start HTTP server
    let addr: SocketAddr = http_bind.parse().context("Invalid HTTP bind address")?;
    let listener = TcpListener::bind(addr)
        .await
        .context("failed to bind TCP listener")?;

    // Mark ready just before serving
    meteoboard_server::set_ready(&state, true);

    tracing::info!(%addr, "HTTP server listening");
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
