//! Error types for chartlist-crawler

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Network or client construction failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Chart page answered with a non-success status
    #[error("Unexpected HTTP status {0}")]
    Status(u16),

    /// CSS selector failed to compile
    #[error("Invalid selector: {0}")]
    Selector(String),

    /// A single chart row could not be read; the row is skipped
    #[error("Malformed chart row: {0}")]
    Row(String),

    /// Dataset write failure
    #[error(transparent)]
    Common(#[from] chartlist_common::Error),
}
