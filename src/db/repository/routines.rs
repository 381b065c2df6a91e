//! Full routine repository trait.
//!
//! This trait defines operations on the mirror collection: per-entry reads
//! for batch/section views, the reschedule override, and the expiry queries
//! the sweep runs on.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::error::RepositoryResult;
use crate::api::{FullRoutineEntry, RoutineId, RoutineOverride, SlotId};

/// Repository trait for full routine mirror operations.
///
/// Entries are created and deleted through [`super::SlotRepository`]
/// alongside their slots; this trait covers the operations that act on the
/// mirror alone.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait RoutineRepository: Send + Sync {
    // ==================== Reads ====================

    /// Fetch a single routine entry by id.
    async fn fetch_routine(&self, id: RoutineId) -> RepositoryResult<Option<FullRoutineEntry>>;

    /// List every routine entry.
    async fn list_routines(&self) -> RepositoryResult<Vec<FullRoutineEntry>>;

    /// Fetch the mirror entry of a slot via the stored slot id.
    async fn routine_for_slot(&self, slot_id: SlotId)
        -> RepositoryResult<Option<FullRoutineEntry>>;

    // ==================== Reschedule / expiry ====================

    /// Apply a temporary override to an entry.
    ///
    /// Captures the pre-override snapshot on the first reschedule and sets
    /// the expiration; see [`FullRoutineEntry::apply_override`].
    ///
    /// # Arguments
    /// * `id` - The entry to override
    /// * `change` - New day/time/room and the expiration instant
    ///
    /// # Returns
    /// * `Ok(FullRoutineEntry)` - The entry with the override applied
    /// * `Err(RepositoryError::NotFound)` - If the entry does not exist
    async fn apply_override(
        &self,
        id: RoutineId,
        change: &RoutineOverride,
    ) -> RepositoryResult<FullRoutineEntry>;

    /// List entries whose expiration is at or before `now`.
    async fn expired_routines(
        &self,
        now: DateTime<Utc>,
    ) -> RepositoryResult<Vec<FullRoutineEntry>>;

    /// Roll an entry's override back to its captured snapshot.
    ///
    /// A no-op returning the unchanged entry when no snapshot is present.
    ///
    /// # Arguments
    /// * `id` - The entry to revert
    ///
    /// # Returns
    /// * `Ok(FullRoutineEntry)` - The entry after the revert
    /// * `Err(RepositoryError::NotFound)` - If the entry does not exist
    async fn revert_routine(&self, id: RoutineId) -> RepositoryResult<FullRoutineEntry>;

    /// Delete entries still matching the expiry filter.
    ///
    /// Secondary cleanup pass after reverts: entries that expired without a
    /// snapshot to restore are removed outright.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of entries deleted
    async fn purge_expired(&self, now: DateTime<Utc>) -> RepositoryResult<usize>;
}
