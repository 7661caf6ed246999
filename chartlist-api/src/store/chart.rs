//! Read-only chart store
//!
//! Loaded once at startup and never mutated afterwards, so it needs no lock:
//! handlers share it through an `Arc`.

use chartlist_common::{dataset, ChartEntry};
use std::path::Path;
use tracing::{error, info};

#[derive(Debug, Clone, Default)]
pub struct ChartStore {
    entries: Vec<ChartEntry>,
}

impl ChartStore {
    /// Load the chart dataset, degrading to an empty store on failure
    ///
    /// A missing or malformed dataset is logged and leaves the service
    /// running; chart queries then report the chart as unavailable.
    pub fn load(path: &Path) -> Self {
        match dataset::load(path) {
            Ok(entries) => {
                info!("✓ Loaded {} chart entries from {}", entries.len(), path.display());
                Self { entries }
            }
            Err(e) => {
                error!("Failed to load chart dataset: {}", e);
                Self::default()
            }
        }
    }

    pub fn from_entries(entries: Vec<ChartEntry>) -> Self {
        Self { entries }
    }

    /// All entries in dataset order
    pub fn all(&self) -> &[ChartEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find_by_id(&self, id: i64) -> Option<&ChartEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn find_by_rank(&self, rank: i64) -> Option<&ChartEntry> {
        self.entries.iter().find(|entry| entry.rank == rank)
    }

    /// Entries whose artist contains `text`, ignoring case
    pub fn filter_by_artist(&self, text: &str) -> Vec<ChartEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.artist_contains(text))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> ChartStore {
        ChartStore::from_entries(vec![
            ChartEntry {
                id: 11,
                rank: 1,
                title: "Seven".to_string(),
                artist: "Cleo".to_string(),
                album: "Seven".to_string(),
            },
            ChartEntry {
                id: 22,
                rank: 2,
                title: "Ditto".to_string(),
                artist: "NewJeans".to_string(),
                album: "OMG".to_string(),
            },
            ChartEntry {
                id: 33,
                rank: 3,
                title: "Hype Boy".to_string(),
                artist: "NewJeans, Cleo".to_string(),
                album: "New Jeans".to_string(),
            },
        ])
    }

    #[test]
    fn test_find_by_id_and_rank() {
        let store = sample();
        assert_eq!(store.find_by_id(22).map(|e| e.rank), Some(2));
        assert_eq!(store.find_by_rank(3).map(|e| e.id), Some(33));
        assert!(store.find_by_id(99).is_none());
        assert!(store.find_by_rank(50).is_none());
    }

    #[test]
    fn test_filter_by_artist_is_case_insensitive_substring() {
        let store = sample();
        let ids: Vec<i64> = store.filter_by_artist("newjeans").iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![22, 33]);

        assert_eq!(store.filter_by_artist("CLE").len(), 2);
        assert!(store.filter_by_artist("aespa").is_empty());
    }

    #[test]
    fn test_all_preserves_dataset_order() {
        let store = sample();
        let ranks: Vec<i64> = store.all().iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_load_missing_dataset_degrades_to_empty() {
        let dir = TempDir::new().unwrap();
        let store = ChartStore::load(&dir.path().join("missing.json"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_malformed_dataset_degrades_to_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chart.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(ChartStore::load(&path).is_empty());
    }

    #[test]
    fn test_load_valid_dataset() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chart.json");
        dataset::save(&path, sample().all()).unwrap();

        let store = ChartStore::load(&path);
        assert_eq!(store.len(), 3);
        assert_eq!(store.find_by_rank(2).map(|e| e.title.as_str()), Some("Ditto"));
    }
}
