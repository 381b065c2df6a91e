//! Class slot repository trait.
//!
//! This trait defines persistence operations for the canonical weekly slot
//! assignments. Every mutation also maintains the full-routine mirror: the
//! two collections are written together so they never diverge.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{ClassSlot, NewClassSlot, SlotId};

/// Repository trait for class slot operations.
///
/// Implementations keep the ClassSlot collection and the FullRoutineEntry
/// mirror aligned: `insert_slot` creates both records, `update_slot`
/// refreshes the mirror's schedule fields through the stored slot id, and
/// `delete_slot` removes both. An implementation must apply each mutation
/// atomically across the two collections.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait SlotRepository: Send + Sync {
    // ==================== Mutations ====================

    /// Insert an accepted slot together with its mirror entry.
    ///
    /// The store assigns the slot id, stamps the given batch number, and
    /// creates the matching FullRoutineEntry carrying that id. An exact
    /// duplicate of the full schedule combination is rejected.
    ///
    /// # Arguments
    /// * `batch_no` - Batch number resolved for the slot's semester
    /// * `slot` - Validated candidate fields
    ///
    /// # Returns
    /// * `Ok(ClassSlot)` - The created slot
    /// * `Err(RepositoryError::Duplicate)` - If the combination already exists
    async fn insert_slot(&self, batch_no: &str, slot: &NewClassSlot) -> RepositoryResult<ClassSlot>;

    /// Overwrite the schedule fields of an existing slot.
    ///
    /// The mirror entry is located via the stored slot id and its schedule
    /// fields are refreshed in the same operation; any pending override
    /// bookkeeping on the mirror is left untouched.
    ///
    /// # Arguments
    /// * `id` - The slot to update
    /// * `fields` - Replacement schedule fields
    ///
    /// # Returns
    /// * `Ok(ClassSlot)` - The updated slot
    /// * `Err(RepositoryError::NotFound)` - If the slot does not exist
    async fn update_slot(&self, id: SlotId, fields: &NewClassSlot) -> RepositoryResult<ClassSlot>;

    /// Delete a slot and its mirror entry.
    ///
    /// # Arguments
    /// * `id` - The slot to delete
    ///
    /// # Returns
    /// * `Ok(ClassSlot)` - The removed slot
    /// * `Err(RepositoryError::NotFound)` - If the slot does not exist
    async fn delete_slot(&self, id: SlotId) -> RepositoryResult<ClassSlot>;

    // ==================== Reads ====================

    /// Fetch a single slot by id.
    async fn fetch_slot(&self, id: SlotId) -> RepositoryResult<Option<ClassSlot>>;

    /// List every stored slot.
    async fn list_slots(&self) -> RepositoryResult<Vec<ClassSlot>>;

    /// List the slots of one semester.
    async fn slots_for_semester(&self, semester_name: &str) -> RepositoryResult<Vec<ClassSlot>>;

    /// List the slots of one semester on one day.
    ///
    /// This is the scan set for the conflict checker: overlap classification
    /// is scoped to records sharing semester and day.
    async fn slots_for_semester_day(
        &self,
        semester_name: &str,
        day: &str,
    ) -> RepositoryResult<Vec<ClassSlot>>;

    /// List the slots booked in one room on one day, across semesters.
    ///
    /// Used by the reschedule availability check, which treats rooms as a
    /// global resource.
    async fn slots_for_day_room(
        &self,
        day: &str,
        room_no: &str,
    ) -> RepositoryResult<Vec<ClassSlot>>;

    // ==================== Health ====================

    /// Check that the backing store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;
}
