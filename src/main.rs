use anyhow::Result;
use serenibot::{config, server};
use tracing::info;

/// Validates that a log level string is valid
fn validate_log_level(level: &str) -> Result<()> {
    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            )
        })?;
    Ok(())
}

/// RUST_LOG, when set, takes precedence over the configured level
fn resolve_log_level(env_level: Option<String>, configured: &str) -> Result<String> {
    let level = env_level.unwrap_or_else(|| configured.to_string());
    validate_log_level(&level)?;
    Ok(level)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Configuration comes before logging so the configured level can be used
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let log_level = match resolve_log_level(
        std::env::var("RUST_LOG").ok(),
        &config.server.logs.level,
    ) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&log_level))
        .json()
        .init();

    info!("Starting SereniBot server with log level: {}", log_level);

    server::run(config).await?;

    Ok(())
}
