//! chartlist-api library
//!
//! Serves a read-only music chart and a mutable personal playlist built on
//! top of it.

use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod service;
pub mod store;

use service::PlaylistService;
use store::{ChartStore, PlaylistStore};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub service: PlaylistService,
}

impl AppState {
    /// Create new application state around the two stores
    pub fn new(chart: ChartStore, playlist: PlaylistStore) -> Self {
        Self {
            service: PlaylistService::new(Arc::new(chart), Arc::new(playlist)),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let songs = Router::new()
        .route("/songs", get(api::list_songs))
        .route("/songs/search", get(api::search_songs))
        .route("/songs/:rank", get(api::get_song_by_rank));

    let playlist = Router::new()
        .route(
            "/playlist",
            get(api::get_playlist).post(api::add_to_playlist),
        )
        .route(
            "/playlist/:id",
            get(api::get_playlist_song)
                .put(api::update_playlist_song)
                .delete(api::delete_playlist_song),
        );

    Router::new()
        .route("/", get(api::root))
        .merge(api::health_routes())
        .merge(songs)
        .merge(playlist)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
