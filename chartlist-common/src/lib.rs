//! # Chartlist Common Library
//!
//! Shared code for the chartlist service and its crawler:
//! - Chart and playlist data model
//! - Chart dataset JSON codec
//! - Configuration resolution
//! - Playlist timestamps
//! - Common error type

pub mod config;
pub mod dataset;
pub mod error;
pub mod models;
pub mod time;

pub use error::{Error, Result};
pub use models::{to_playlist_entry, ChartEntry, PlaylistEntry};
