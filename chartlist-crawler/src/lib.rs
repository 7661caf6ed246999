//! chartlist-crawler library
//!
//! Offline ingestion of the chart dataset: fetch the chart page, extract one
//! [`ChartEntry`] per row, and write the JSON document the API service loads
//! at startup.

use chartlist_common::config::CrawlerConfig;
use chartlist_common::{dataset, ChartEntry};
use std::path::Path;
use tracing::{error, info, warn};

pub mod error;
pub mod fetch;
pub mod parse;

pub use error::{Error, Result};
pub use fetch::ChartClient;
pub use parse::parse_chart;

/// Fetch and parse the chart, degrading to an empty list on any failure
pub async fn crawl(config: &CrawlerConfig) -> Vec<ChartEntry> {
    match try_crawl(config).await {
        Ok(entries) => {
            info!("Extracted {} chart entries", entries.len());
            entries
        }
        Err(e) => {
            error!("Chart crawl failed: {}", e);
            Vec::new()
        }
    }
}

async fn try_crawl(config: &CrawlerConfig) -> Result<Vec<ChartEntry>> {
    let client = ChartClient::from_config(config)?;
    let html = client.fetch_page().await?;
    parse_chart(&html)
}

/// Write the crawled entries to `path`, replacing any existing dataset
pub fn write_dataset(path: &Path, entries: &[ChartEntry]) -> Result<()> {
    if entries.is_empty() {
        warn!("Writing an empty chart dataset to {}", path.display());
    }
    dataset::save(path, entries)?;
    info!("✓ Saved {} chart entries to {}", entries.len(), path.display());
    Ok(())
}
