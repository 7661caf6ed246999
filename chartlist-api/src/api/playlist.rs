//! Playlist endpoints
//!
//! `GET|POST /playlist`, `GET|PUT|DELETE /playlist/:id`

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::service::{PlaylistDetail, PlaylistListing};
use crate::AppState;

/// Body of `POST /playlist`
#[derive(Debug, Deserialize)]
pub struct AddSongRequest {
    /// Chart id of the song to copy
    pub id: i64,
    #[serde(default)]
    pub comment: String,
}

/// Body of `PUT /playlist/:id`
#[derive(Debug, Deserialize)]
pub struct UpdateSongRequest {
    pub comment: String,
}

/// GET /playlist
pub async fn get_playlist(State(state): State<AppState>) -> Json<PlaylistListing> {
    Json(state.service.list_playlist().await)
}

/// POST /playlist
///
/// 404 when the chart has no such id; a duplicate add answers 200 with
/// `success: false`.
pub async fn add_to_playlist(
    State(state): State<AppState>,
    payload: Result<Json<AddSongRequest>, JsonRejection>,
) -> ApiResult<Json<PlaylistDetail>> {
    let Json(req) = payload?;
    Ok(Json(state.service.add_to_playlist(req.id, req.comment).await?))
}

/// GET /playlist/:id
pub async fn get_playlist_song(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<PlaylistDetail>> {
    let Path(id) = id?;
    Ok(Json(state.service.playlist_entry(id).await))
}

/// PUT /playlist/:id
pub async fn update_playlist_song(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateSongRequest>, JsonRejection>,
) -> ApiResult<Json<PlaylistDetail>> {
    let Path(id) = id?;
    let Json(req) = payload?;
    Ok(Json(state.service.update_playlist_entry(id, req.comment).await))
}

/// DELETE /playlist/:id
pub async fn delete_playlist_song(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<PlaylistDetail>> {
    let Path(id) = id?;
    Ok(Json(state.service.delete_playlist_entry(id).await))
}
