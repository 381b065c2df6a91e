//! Slot overlap classification.
//!
//! Given a candidate slot and the stored slots sharing its semester and day,
//! classify every time overlap into the conflict categories surfaced to
//! clients. Pure read-then-decide logic over a fetched scan set; callers
//! fetch the slots and act on the returned list. Not safe against two
//! concurrent submissions validating against the same snapshot; only exact
//! duplicates are guarded, by the store's duplicate-key rule.

use crate::api::{ClassSlot, NewClassSlot, SlotId};

/// One overlap classification between a candidate and a stored slot.
///
/// Several categories can fire for the same pair; callers report all of
/// them. Downstream clients match on the exact message text, so the strings
/// returned by [`ConflictKind::message`] are load-bearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConflictKind {
    /// Same room, same section
    RoomSameSection,
    /// Same room, different section
    RoomDifferentSection,
    /// Same teacher, same section
    TeacherSameSection,
    /// Same teacher, different section
    TeacherDifferentSection,
    /// Same section split across two rooms
    SectionDifferentRoom,
}

impl ConflictKind {
    /// The client-facing message for this category.
    pub fn message(self) -> &'static str {
        match self {
            Self::RoomSameSection => {
                "Conflict: Overlapping class slot in the same room for the same section."
            }
            Self::RoomDifferentSection => {
                "Conflict: Overlapping class slot in the same room for a different section."
            }
            Self::TeacherSameSection => {
                "Conflict: Overlapping class slot with the same teacher for the same section."
            }
            Self::TeacherDifferentSection => {
                "Conflict: Overlapping class slot with the same teacher for a different section."
            }
            Self::SectionDifferentRoom => {
                "Conflict: Overlapping class slot for the same section in different rooms."
            }
        }
    }
}

/// Classify one overlapping pair.
///
/// Checks run in a fixed order so the reported messages are stable; callers
/// have already established that the windows overlap.
fn classify_pair(existing: &ClassSlot, candidate: &NewClassSlot) -> Vec<ConflictKind> {
    let same_room = existing.room_no == candidate.room_no;
    let same_teacher = existing.teacher_id == candidate.teacher_id;
    let same_section = existing.section == candidate.section;

    let mut kinds = Vec::new();
    if same_room && same_section {
        kinds.push(ConflictKind::RoomSameSection);
    }
    if same_room && !same_section {
        kinds.push(ConflictKind::RoomDifferentSection);
    }
    if same_teacher && same_section {
        kinds.push(ConflictKind::TeacherSameSection);
    }
    if same_teacher && !same_section {
        kinds.push(ConflictKind::TeacherDifferentSection);
    }
    if same_section && !same_room {
        kinds.push(ConflictKind::SectionDifferentRoom);
    }
    kinds
}

/// Find every conflict between a candidate and the stored slots.
///
/// Only slots sharing the candidate's semester and day are considered, and
/// on update the slot being replaced is excluded so it cannot conflict with
/// itself. Overlap uses the open-interval predicate, so back-to-back windows
/// never conflict. Returns all triggered categories in store order.
pub fn find_conflicts(
    candidate: &NewClassSlot,
    existing: &[ClassSlot],
    exclude: Option<SlotId>,
) -> Vec<ConflictKind> {
    let window = candidate.time_range();

    let mut conflicts = Vec::new();
    for slot in existing {
        if exclude == Some(slot.id) {
            continue;
        }
        if slot.semester_name != candidate.semester_name || slot.day != candidate.day {
            continue;
        }
        if !slot.time_range().overlaps(&window) {
            continue;
        }
        conflicts.extend(classify_pair(slot, candidate));
    }
    conflicts
}

/// The client-facing messages for a list of conflicts.
pub fn conflict_messages(conflicts: &[ConflictKind]) -> Vec<String> {
    conflicts
        .iter()
        .map(|kind| kind.message().to_string())
        .collect()
}
