//! Mutable playlist store
//!
//! Uses a tokio RwLock: reads share the lock, and every mutation holds the
//! write lock for its whole read-modify-write so concurrent adds of the same
//! id cannot both succeed.

use chartlist_common::{time, PlaylistEntry};
use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::RwLock;

/// Insert rejected because the id is already in the playlist
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Playlist already contains id {0}")]
pub struct DuplicateEntry(pub i64);

#[derive(Debug, Default)]
pub struct PlaylistStore {
    /// Insertion order; reads sort by `added_at`
    entries: RwLock<Vec<PlaylistEntry>>,
}

impl PlaylistStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries sorted ascending by `added_at`
    ///
    /// The sort is stable, so entries sharing a timestamp keep insertion order.
    pub async fn list_all(&self) -> Vec<PlaylistEntry> {
        let mut entries = self.entries.read().await.clone();
        entries.sort_by_key(|entry| entry.added_at);
        entries
    }

    pub async fn find_by_id(&self, id: i64) -> Option<PlaylistEntry> {
        self.entries
            .read()
            .await
            .iter()
            .find(|entry| entry.id == id)
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Append `entry` as given unless its id is already present
    pub async fn insert(&self, entry: PlaylistEntry) -> Result<(), DuplicateEntry> {
        let mut entries = self.entries.write().await;
        if entries.iter().any(|existing| existing.id == entry.id) {
            return Err(DuplicateEntry(entry.id));
        }
        entries.push(entry);
        Ok(())
    }

    /// Build, stamp and append an entry for `id` unless one already exists
    ///
    /// `build` receives the `added_at` stamp, which is taken under the write
    /// lock and is strictly later than every stamp already stored.
    pub async fn insert_with<F>(&self, id: i64, build: F) -> Result<PlaylistEntry, DuplicateEntry>
    where
        F: FnOnce(DateTime<Utc>) -> PlaylistEntry,
    {
        let mut entries = self.entries.write().await;
        if entries.iter().any(|entry| entry.id == id) {
            return Err(DuplicateEntry(id));
        }

        let latest = entries.iter().map(|entry| entry.added_at).max();
        let entry = build(time::stamp_after(latest));
        debug_assert_eq!(entry.id, id);
        entries.push(entry.clone());
        Ok(entry)
    }

    /// Replace the comment of entry `id`, keeping every other field
    pub async fn update_comment(&self, id: i64, comment: impl Into<String>) -> Option<PlaylistEntry> {
        let mut entries = self.entries.write().await;
        let entry = entries.iter_mut().find(|entry| entry.id == id)?;
        entry.comment = comment.into();
        Some(entry.clone())
    }

    /// Remove entry `id`, returning it with the number of entries left
    pub async fn remove_by_id(&self, id: i64) -> Option<(PlaylistEntry, usize)> {
        let mut entries = self.entries.write().await;
        let index = entries.iter().position(|entry| entry.id == id)?;
        let removed = entries.remove(index);
        Some((removed, entries.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn entry(id: i64, added_at: DateTime<Utc>) -> PlaylistEntry {
        PlaylistEntry {
            id,
            rank: id,
            title: format!("Song {}", id),
            artist: "Artist".to_string(),
            album: "Album".to_string(),
            comment: String::new(),
            added_at,
        }
    }

    #[tokio::test]
    async fn test_list_all_sorts_by_added_at() {
        let store = PlaylistStore::new();
        store.insert(entry(3, at(30))).await.unwrap();
        store.insert(entry(1, at(10))).await.unwrap();
        store.insert(entry(2, at(20))).await.unwrap();

        let ids: Vec<i64> = store.list_all().await.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_equal_timestamps_keep_insertion_order() {
        let store = PlaylistStore::new();
        store.insert(entry(5, at(0))).await.unwrap();
        store.insert(entry(4, at(0))).await.unwrap();

        let ids: Vec<i64> = store.list_all().await.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![5, 4]);
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_id() {
        let store = PlaylistStore::new();
        store.insert(entry(1, at(0))).await.unwrap();

        let result = store.insert(entry(1, at(5))).await;
        assert_eq!(result, Err(DuplicateEntry(1)));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_insert_with_skips_builder_on_duplicate() {
        let store = PlaylistStore::new();
        store.insert(entry(1, at(0))).await.unwrap();

        let mut called = false;
        let result = store
            .insert_with(1, |added_at| {
                called = true;
                entry(1, added_at)
            })
            .await;

        assert!(result.is_err());
        assert!(!called);
    }

    #[tokio::test]
    async fn test_insert_with_stamps_after_latest_entry() {
        let store = PlaylistStore::new();
        // Existing stamp ahead of the wall clock, as after a backwards step
        let ahead = Utc::now() + chrono::Duration::hours(1);
        store.insert(entry(1, ahead)).await.unwrap();

        let added = store.insert_with(2, |added_at| entry(2, added_at)).await.unwrap();
        assert!(added.added_at > ahead);

        let ids: Vec<i64> = store.list_all().await.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_successive_stamps_strictly_increase() {
        let store = PlaylistStore::new();
        for id in 1..=20 {
            store.insert_with(id, |added_at| entry(id, added_at)).await.unwrap();
        }

        let listed = store.list_all().await;
        let ids: Vec<i64> = listed.iter().map(|e| e.id).collect();
        assert_eq!(ids, (1..=20).collect::<Vec<_>>());
        assert!(listed.windows(2).all(|w| w[0].added_at < w[1].added_at));
    }

    #[tokio::test]
    async fn test_update_comment_preserves_other_fields() {
        let store = PlaylistStore::new();
        let original = entry(7, at(42));
        store.insert(original.clone()).await.unwrap();

        let updated = store.update_comment(7, "on repeat").await.unwrap();

        assert_eq!(updated.comment, "on repeat");
        assert_eq!(
            PlaylistEntry {
                comment: String::new(),
                ..updated.clone()
            },
            original
        );
        assert_eq!(store.find_by_id(7).await, Some(updated));
    }

    #[tokio::test]
    async fn test_update_comment_missing_id() {
        let store = PlaylistStore::new();
        assert!(store.update_comment(9, "x").await.is_none());
    }

    #[tokio::test]
    async fn test_remove_by_id() {
        let store = PlaylistStore::new();
        store.insert(entry(1, at(0))).await.unwrap();
        store.insert(entry(2, at(1))).await.unwrap();

        let (removed, remaining) = store.remove_by_id(1).await.unwrap();
        assert_eq!(removed.id, 1);
        assert_eq!(remaining, 1);
        assert!(store.find_by_id(1).await.is_none());

        assert!(store.remove_by_id(1).await.is_none());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_inserts_admit_one() {
        let store = std::sync::Arc::new(PlaylistStore::new());
        let mut handles = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.insert(entry(1, at(i))).await.is_ok()
            }));
        }

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap() {
                successes += 1;
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(store.len().await, 1);
    }
}
