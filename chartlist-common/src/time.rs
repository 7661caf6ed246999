//! Playlist timestamps
//!
//! Playlist reads order entries by `added_at`, so a new stamp must sort after
//! every stamp already in the playlist even when the wall clock steps
//! backwards.

use chrono::{DateTime, Duration, Utc};

/// Wall-clock time clamped to be strictly later than `latest`
pub fn stamp_after(latest: Option<DateTime<Utc>>) -> DateTime<Utc> {
    clamp_after(Utc::now(), latest)
}

/// `now`, or `latest + 1ns` when `now` is not later than `latest`
pub fn clamp_after(now: DateTime<Utc>, latest: Option<DateTime<Utc>>) -> DateTime<Utc> {
    match latest {
        Some(latest) if now <= latest => latest + Duration::nanoseconds(1),
        _ => now,
    }
}
