//! Chart endpoints
//!
//! `GET /songs`, `GET /songs/search?artist=`, `GET /songs/:rank`

use axum::{
    extract::{rejection::PathRejection, rejection::QueryRejection, Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::service::{ChartListing, SongDetail};
use crate::AppState;

/// Query parameters for artist search
#[derive(Debug, Deserialize)]
pub struct ArtistQuery {
    /// Artist name fragment (case-insensitive)
    pub artist: String,
}

/// GET /songs
pub async fn list_songs(State(state): State<AppState>) -> Json<ChartListing> {
    Json(state.service.list_chart())
}

/// GET /songs/search?artist=TEXT
///
/// 404 when the chart never loaded; an empty result otherwise.
pub async fn search_songs(
    State(state): State<AppState>,
    query: Result<Query<ArtistQuery>, QueryRejection>,
) -> ApiResult<Json<ChartListing>> {
    let Query(query) = query?;
    Ok(Json(state.service.search_chart(&query.artist)?))
}

/// GET /songs/:rank
///
/// Out-of-range and unknown ranks are reported in the body with
/// `success: false`; non-integer text is a 400 and only an unloaded chart
/// produces 404.
pub async fn get_song_by_rank(
    State(state): State<AppState>,
    rank: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<SongDetail>> {
    let Path(rank) = rank?;
    let lookup = state.service.chart_entry_by_rank_text(&rank)?;
    Ok(Json(lookup.into()))
}
