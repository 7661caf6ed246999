//! HTTP API handlers for chartlist-api

pub mod health;
pub mod playlist;
pub mod songs;

pub use health::{health_routes, root};
pub use playlist::{
    add_to_playlist, delete_playlist_song, get_playlist, get_playlist_song, update_playlist_song,
};
pub use songs::{get_song_by_rank, list_songs, search_songs};
