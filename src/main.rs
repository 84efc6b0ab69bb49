use anyhow::{Context, Result};
use petwise::{config, server};
use tracing::info;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// RUST_LOG wins over `server.logs.level`; either must name a real level.
fn init_logging(configured: &str) -> Result<String> {
    let level = std::env::var("RUST_LOG").unwrap_or_else(|_| configured.to_string());
    level.parse::<LevelFilter>().with_context(|| {
        format!("Invalid log level: '{level}'. Valid levels: error, warn, info, debug, trace")
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level)))
        .json()
        .init();
    Ok(level)
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()
        .await
        .context("Failed to load configuration")?;
    let log_level = init_logging(&config.server.logs.level)?;

    info!(
        backend = config.backend.kind(),
        log_level = %log_level,
        "Starting Petwise server"
    );

    server::run(config).await.inspect_err(|e| {
        tracing::error!("Server stopped: {}", e);
    })?;
    Ok(())
}
