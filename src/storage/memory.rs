//! In-memory track store.
//!
//! A `BTreeMap` keyed by identifier behind a single writer lock. The map's
//! key order is the insertion order because identifiers are strictly
//! increasing, so `get_all` is a plain ordered scan.

use super::TrackStore;
use crate::core::{Result, TrackError, TrackRecord};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// Production in-process store. A networked document store would implement
/// the same [`TrackStore`] trait and rely on backend atomicity instead of
/// this lock.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tracks: RwLock<BTreeMap<i64, TrackRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.tracks.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tracks.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl TrackStore for InMemoryStore {
    async fn add(&self, record: TrackRecord) -> Result<()> {
        let mut tracks = self.tracks.write().await;
        if tracks.contains_key(&record.id) {
            return Err(TrackError::storage(format!(
                "duplicate track id {}",
                record.id
            )));
        }
        tracing::debug!(id = record.id, pilot = %record.pilot, "storing track");
        tracks.insert(record.id, record);
        Ok(())
    }

    async fn get(&self, id: i64) -> Result<TrackRecord> {
        self.tracks
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(TrackError::NotFound(id))
    }

    async fn get_all(&self) -> Result<Vec<TrackRecord>> {
        Ok(self.tracks.read().await.values().cloned().collect())
    }
}
