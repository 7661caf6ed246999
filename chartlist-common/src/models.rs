//! Chart and playlist data model
//!
//! A playlist entry is not a subtype of a chart entry: it is a standalone
//! record holding a frozen copy of the chart fields taken when the song was
//! added, plus the user's comment and the insertion timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lowest rank a chart entry may hold
pub const MIN_RANK: i64 = 1;

/// Highest rank a chart entry may hold
pub const MAX_RANK: i64 = 100;

/// One ranked song from the ingested chart dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartEntry {
    /// Stable identifier assigned at ingestion time
    pub id: i64,
    /// Chart position (1-100)
    pub rank: i64,
    pub title: String,
    pub artist: String,
    pub album: String,
}

impl ChartEntry {
    /// Case-insensitive substring match against the artist field
    pub fn artist_contains(&self, needle: &str) -> bool {
        self.artist.to_lowercase().contains(&needle.to_lowercase())
    }
}

/// Whether `rank` lies within the chart's valid range
pub fn is_valid_rank(rank: i64) -> bool {
    (MIN_RANK..=MAX_RANK).contains(&rank)
}

/// A song in the personal playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    /// Shared with the chart entry the song was copied from
    pub id: i64,
    pub rank: i64,
    pub title: String,
    pub artist: String,
    pub album: String,
    /// User-supplied note, the only mutable field
    pub comment: String,
    /// Insertion time, never changed after the entry is created
    pub added_at: DateTime<Utc>,
}

/// Snapshot a chart entry into a new playlist entry
pub fn to_playlist_entry(
    chart: &ChartEntry,
    comment: impl Into<String>,
    added_at: DateTime<Utc>,
) -> PlaylistEntry {
    PlaylistEntry {
        id: chart.id,
        rank: chart.rank,
        title: chart.title.clone(),
        artist: chart.artist.clone(),
        album: chart.album.clone(),
        comment: comment.into(),
        added_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn seven() -> ChartEntry {
        ChartEntry {
            id: 1,
            rank: 1,
            title: "Seven".to_string(),
            artist: "Cleo".to_string(),
            album: "Seven".to_string(),
        }
    }

    #[test]
    fn test_to_playlist_entry_copies_chart_fields() {
        let added_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let entry = to_playlist_entry(&seven(), "great", added_at);

        assert_eq!(entry.id, 1);
        assert_eq!(entry.rank, 1);
        assert_eq!(entry.title, "Seven");
        assert_eq!(entry.artist, "Cleo");
        assert_eq!(entry.album, "Seven");
        assert_eq!(entry.comment, "great");
        assert_eq!(entry.added_at, added_at);
    }

    #[test]
    fn test_snapshot_is_independent_of_source() {
        let mut chart = seven();
        let entry = to_playlist_entry(&chart, "", Utc::now());

        chart.rank = 42;
        chart.title = "Renamed".to_string();

        assert_eq!(entry.rank, 1);
        assert_eq!(entry.title, "Seven");
    }

    #[test]
    fn test_artist_contains_ignores_case() {
        let entry = ChartEntry {
            artist: "NewJeans, Cleo".to_string(),
            ..seven()
        };
        assert!(entry.artist_contains("newjeans"));
        assert!(entry.artist_contains("CLEO"));
        assert!(!entry.artist_contains("aespa"));
    }

    #[test]
    fn test_rank_range() {
        assert!(is_valid_rank(1));
        assert!(is_valid_rank(100));
        assert!(!is_valid_rank(0));
        assert!(!is_valid_rank(101));
        assert!(!is_valid_rank(-5));
    }

    #[test]
    fn test_playlist_entry_serializes_added_at_as_rfc3339() {
        let added_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let entry = to_playlist_entry(&seven(), "great", added_at);
        let value = serde_json::to_value(&entry).unwrap();

        assert_eq!(value["added_at"], "2024-05-01T12:00:00Z");
        assert_eq!(value["comment"], "great");
    }
}
