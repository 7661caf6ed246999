//! chartlist-api - chart and playlist HTTP service
//!
//! Loads the chart dataset once at startup, then serves chart queries and
//! playlist CRUD from memory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chartlist_api::store::{ChartStore, PlaylistStore};
use chartlist_api::{build_router, AppState};
use chartlist_common::config::{load_toml_config, ServerConfig, ServerOverrides};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for chartlist-api
#[derive(Parser, Debug)]
#[command(name = "chartlist-api")]
#[command(about = "Music chart and personal playlist HTTP service")]
#[command(version)]
struct Args {
    /// Address to bind
    #[arg(long, env = "CHARTLIST_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "CHARTLIST_PORT")]
    port: Option<u16>,

    /// Chart dataset JSON file
    #[arg(short, long, env = "CHARTLIST_DATASET")]
    dataset: Option<PathBuf>,

    /// Log level used when RUST_LOG is unset
    #[arg(long, env = "CHARTLIST_LOG_LEVEL")]
    log_level: Option<String>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let (toml, config_source) = load_toml_config(args.config.as_deref());
    let config = ServerConfig::resolve(
        ServerOverrides {
            host: args.host,
            port: args.port,
            dataset_path: args.dataset,
            log_level: args.log_level,
        },
        &toml,
    );

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("chartlist_api={0},chartlist_common={0},tower_http={0}", config.log_level)
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting chartlist-api v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    config_source.log();
    info!("Dataset path: {}", config.dataset_path.display());

    // Load failures leave an empty chart; the service still starts
    let chart = ChartStore::load(&config.dataset_path);
    let state = AppState::new(chart, PlaylistStore::new());
    let app = build_router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("chartlist-api listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
