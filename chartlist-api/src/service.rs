//! Query/command layer over the chart and playlist stores
//!
//! Three failure categories stay distinct here:
//! - business outcomes (duplicate add, playlist miss, rank miss) are typed
//!   results with `success: false`
//! - an out-of-range rank is a caller error, reported as
//!   [`RankLookup::OutOfRange`]
//! - an empty chart, or an add for an id the chart does not have, is a
//!   [`ServiceError`]

use chartlist_common::models::{is_valid_rank, MAX_RANK, MIN_RANK};
use chartlist_common::{to_playlist_entry, ChartEntry, PlaylistEntry};
use serde::Serialize;
use std::num::IntErrorKind;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use crate::store::{ChartStore, PlaylistStore};

/// Conditions with no meaningful domain answer
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// The chart dataset never loaded (or loaded empty)
    #[error("Chart data is not available")]
    ChartUnavailable,

    /// Add requested for an id the chart does not contain
    #[error("No chart song found for ID {0}")]
    ChartEntryNotFound(i64),

    /// Rank text that is not an integer at all
    #[error("Invalid rank '{0}': expected an integer")]
    InvalidRank(String),
}

// ============================================================================
// Result payloads
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ChartListing {
    pub total: usize,
    pub songs: Vec<ChartEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SongDetail {
    pub success: bool,
    pub song: Option<ChartEntry>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlaylistListing {
    pub total: usize,
    pub songs: Vec<PlaylistEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlaylistDetail {
    pub success: bool,
    pub song: Option<PlaylistEntry>,
    pub message: String,
}

impl PlaylistDetail {
    fn found(song: PlaylistEntry, message: impl Into<String>) -> Self {
        Self {
            success: true,
            song: Some(song),
            message: message.into(),
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            song: None,
            message: message.into(),
        }
    }

    fn missing(id: i64) -> Self {
        Self::failed(format!("No song with ID {} found in the playlist", id))
    }
}

/// Outcome of a lookup by chart rank
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RankLookup {
    Found(ChartEntry),
    /// Requested rank (as written) lies outside 1-100; the store was not
    /// consulted
    OutOfRange(String),
    /// Valid rank with no chart entry
    Missing(i64),
}

impl From<RankLookup> for SongDetail {
    fn from(lookup: RankLookup) -> Self {
        match lookup {
            RankLookup::Found(song) => Self {
                success: true,
                message: format!("Rank {} song retrieved", song.rank),
                song: Some(song),
            },
            RankLookup::OutOfRange(rank) => Self {
                success: false,
                song: None,
                message: format!(
                    "Rank must be between {} and {}. Got: {}",
                    MIN_RANK, MAX_RANK, rank
                ),
            },
            RankLookup::Missing(rank) => Self {
                success: false,
                song: None,
                message: format!("No song found at rank {}", rank),
            },
        }
    }
}

// ============================================================================
// Service
// ============================================================================

#[derive(Debug, Clone)]
pub struct PlaylistService {
    chart: Arc<ChartStore>,
    playlist: Arc<PlaylistStore>,
}

impl PlaylistService {
    pub fn new(chart: Arc<ChartStore>, playlist: Arc<PlaylistStore>) -> Self {
        Self { chart, playlist }
    }

    /// Number of loaded chart entries
    pub fn chart_len(&self) -> usize {
        self.chart.len()
    }

    /// Full chart; an empty store yields an empty listing
    pub fn list_chart(&self) -> ChartListing {
        ChartListing {
            total: self.chart.len(),
            songs: self.chart.all().to_vec(),
        }
    }

    /// Case-insensitive artist substring search
    pub fn search_chart(&self, artist: &str) -> Result<ChartListing, ServiceError> {
        if self.chart.is_empty() {
            return Err(ServiceError::ChartUnavailable);
        }

        let songs = self.chart.filter_by_artist(artist);
        debug!("Artist search '{}' matched {} songs", artist, songs.len());
        Ok(ChartListing {
            total: songs.len(),
            songs,
        })
    }

    /// Look up a chart entry by rank, validating the range first
    pub fn chart_entry_by_rank(&self, rank: i64) -> Result<RankLookup, ServiceError> {
        if !is_valid_rank(rank) {
            return Ok(RankLookup::OutOfRange(rank.to_string()));
        }
        if self.chart.is_empty() {
            return Err(ServiceError::ChartUnavailable);
        }

        Ok(match self.chart.find_by_rank(rank) {
            Some(song) => RankLookup::Found(song.clone()),
            None => RankLookup::Missing(rank),
        })
    }

    /// Rank lookup from request text
    ///
    /// Integers too large for `i64` are out of range like any other rank
    /// outside 1-100; only non-integer text is an error.
    pub fn chart_entry_by_rank_text(&self, text: &str) -> Result<RankLookup, ServiceError> {
        match text.parse::<i64>() {
            Ok(rank) => self.chart_entry_by_rank(rank),
            Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
                Ok(RankLookup::OutOfRange(text.to_string()))
            }
            Err(_) => Err(ServiceError::InvalidRank(text.to_string())),
        }
    }

    /// Playlist ordered by insertion time
    pub async fn list_playlist(&self) -> PlaylistListing {
        let songs = self.playlist.list_all().await;
        PlaylistListing {
            total: songs.len(),
            songs,
        }
    }

    /// Copy chart entry `id` into the playlist
    pub async fn add_to_playlist(
        &self,
        id: i64,
        comment: String,
    ) -> Result<PlaylistDetail, ServiceError> {
        let chart_song = self
            .chart
            .find_by_id(id)
            .ok_or(ServiceError::ChartEntryNotFound(id))?;

        let inserted = self
            .playlist
            .insert_with(id, |added_at| to_playlist_entry(chart_song, comment, added_at))
            .await;

        Ok(match inserted {
            Ok(entry) => {
                info!("Added '{}' (id {}) to playlist", entry.title, id);
                let message = format!("'{}' was added to the playlist", entry.title);
                PlaylistDetail::found(entry, message)
            }
            Err(_) => {
                debug!("Rejected duplicate playlist add for id {}", id);
                PlaylistDetail::failed(format!(
                    "'{}' is already in the playlist",
                    chart_song.title
                ))
            }
        })
    }

    pub async fn playlist_entry(&self, id: i64) -> PlaylistDetail {
        match self.playlist.find_by_id(id).await {
            Some(entry) => PlaylistDetail::found(entry, "Playlist song retrieved"),
            None => PlaylistDetail::missing(id),
        }
    }

    /// Replace the comment of playlist entry `id`
    pub async fn update_playlist_entry(&self, id: i64, comment: String) -> PlaylistDetail {
        match self.playlist.update_comment(id, comment).await {
            Some(entry) => {
                info!("Updated comment on playlist id {}", id);
                PlaylistDetail::found(entry, "Playlist song updated")
            }
            None => PlaylistDetail::missing(id),
        }
    }

    pub async fn delete_playlist_entry(&self, id: i64) -> PlaylistDetail {
        match self.playlist.remove_by_id(id).await {
            Some((entry, remaining)) => {
                info!("Removed '{}' (id {}) from playlist", entry.title, id);
                let message = format!(
                    "'{}' was removed from the playlist. Playlist size: {}",
                    entry.title, remaining
                );
                PlaylistDetail::found(entry, message)
            }
            None => PlaylistDetail::missing(id),
        }
    }
}
