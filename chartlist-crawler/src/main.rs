//! chartlist-crawler - chart dataset ingestion
//!
//! Scrapes the chart page once and writes the JSON dataset read by
//! chartlist-api at startup.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chartlist_common::config::{load_toml_config, CrawlerConfig, CrawlerOverrides};
use clap::Parser;
use tracing::info;

/// Command-line arguments for chartlist-crawler
#[derive(Parser, Debug)]
#[command(name = "chartlist-crawler")]
#[command(about = "Scrape the music chart into the chartlist dataset")]
#[command(version)]
struct Args {
    /// Chart page URL
    #[arg(long, env = "CHARTLIST_CHART_URL")]
    url: Option<String>,

    /// User-Agent header sent to the chart site
    #[arg(long)]
    user_agent: Option<String>,

    /// Dataset file to write
    #[arg(short, long, env = "CHARTLIST_OUTPUT")]
    output: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

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
    let config = CrawlerConfig::resolve(
        CrawlerOverrides {
            url: args.url,
            user_agent: args.user_agent,
            output: args.output,
            timeout_secs: args.timeout_secs,
            log_level: args.log_level,
        },
        &toml,
    );

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("chartlist_crawler={0},chartlist_common={0}", config.log_level).into()
            }),
        )
        .init();

    info!(
        "Starting chartlist-crawler v{}: {} -> {}",
        env!("CARGO_PKG_VERSION"),
        config.url,
        config.output.display()
    );

    config_source.log();

    let entries = chartlist_crawler::crawl(&config).await;

    chartlist_crawler::write_dataset(&config.output, &entries)
        .with_context(|| format!("Failed to write {}", config.output.display()))?;

    Ok(())
}
