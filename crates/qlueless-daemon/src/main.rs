//! Qlueless Assembly API server
//!
//! Serves ventures, things and orders over HTTP with optionally wrapped
//! replies, plus the service changelog and OpenAPI document.

use clap::Parser;
use qlueless_daemon::config::StorageConfig;
use qlueless_daemon::error::{DaemonError, DaemonResult};
use qlueless_daemon::{DaemonConfig, Server};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Qlueless API CLI
#[derive(Parser)]
#[command(name = "qserver")]
#[command(about = "Qlueless Assembly API - ventures, things and orders", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "QLUELESS_CONFIG")]
    config: Option<String>,

    /// Listen address, overrides the configuration file
    #[arg(short, long, env = "QLUELESS_LISTEN_ADDR")]
    listen: Option<SocketAddr>,

    /// Log level
    #[arg(long, env = "QLUELESS_LOG_LEVEL")]
    log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long, env = "QLUELESS_LOG_JSON")]
    json: bool,

    /// SQLite database URL for ventures, e.g. sqlite://qlueless.db
    #[arg(long, env = "QLUELESS_DATABASE_URL")]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> DaemonResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = DaemonConfig::load(cli.config.as_deref())
        .map_err(|e| DaemonError::Config(e.to_string()))?;

    // Override with CLI args
    if let Some(listen) = cli.listen {
        config.server.listen_addr = listen;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if cli.json {
        config.logging.json = true;
    }
    if let Some(url) = cli.database_url {
        config.storage = StorageConfig::sqlite(url);
    }

    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.level.clone().into());

    if config.logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        listen = %config.server.listen_addr,
        "Starting Qlueless API"
    );

    // Create and run server
    let server = Server::new(config).await?;
    server.run().await
}
