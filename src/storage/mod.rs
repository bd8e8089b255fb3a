//! Store abstraction for ingested track records.
//!
//! The store is an append-only, id-ordered collection. Identity is assigned
//! by the caller before a record is added; the store never invents or
//! rewrites identifiers, and it has no update or delete surface.

pub mod memory;

pub use memory::InMemoryStore;

use crate::core::{Result, TrackRecord};

/// Trait for track store implementations.
#[async_trait::async_trait]
pub trait TrackStore: Send + Sync {
    /// Append one record. The record's id must already be set; adding a
    /// record whose id is already present is an error, never a silent drop.
    async fn add(&self, record: TrackRecord) -> Result<()>;

    /// Exact-match lookup by identifier.
    async fn get(&self, id: i64) -> Result<TrackRecord>;

    /// Every stored record in non-decreasing id order. An empty store
    /// yields an empty vec; callers deriving page bounds handle that case
    /// themselves.
    async fn get_all(&self) -> Result<Vec<TrackRecord>>;
}
