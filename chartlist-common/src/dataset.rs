//! Chart dataset JSON codec
//!
//! The dataset is a single UTF-8 JSON array of `{id, rank, title, artist,
//! album}` objects, written by the crawler and read once by the API service
//! at startup.

use crate::models::ChartEntry;
use crate::{Error, Result};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, warn};

/// Default dataset location, relative to the working directory
pub const DEFAULT_DATASET_PATH: &str = "data/melon_chart_top100.json";

/// Read and validate the chart dataset at `path`
pub fn load(path: &Path) -> Result<Vec<ChartEntry>> {
    if !path.exists() {
        return Err(Error::NotFound(format!(
            "chart dataset {}",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path)?;
    let entries: Vec<ChartEntry> = serde_json::from_str(&content)?;
    validate(&entries)?;

    debug!("Read {} chart entries from {}", entries.len(), path.display());
    Ok(entries)
}

/// Reject datasets whose ids collide
///
/// Ranks outside 1-100 are tolerated with a warning: rank lookups validate
/// the requested rank, so such entries are only reachable through listing.
pub fn validate(entries: &[ChartEntry]) -> Result<()> {
    let mut seen = HashSet::with_capacity(entries.len());
    for entry in entries {
        if !seen.insert(entry.id) {
            return Err(Error::InvalidInput(format!(
                "duplicate chart id {}",
                entry.id
            )));
        }
        if !crate::models::is_valid_rank(entry.rank) {
            warn!(
                "Chart entry {} ('{}') has out-of-range rank {}",
                entry.id, entry.title, entry.rank
            );
        }
    }
    Ok(())
}

/// Write `entries` to `path`, creating parent directories and replacing any
/// existing file
pub fn save(path: &Path, entries: &[ChartEntry]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(entries)?;
    std::fs::write(path, json)?;
    Ok(())
}
