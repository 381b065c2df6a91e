//! Public API surface for the Rust backend.
//!
//! This file consolidates the domain types shared by the service layer, the
//! repository layer, and the HTTP API. All types derive Serialize/Deserialize
//! for JSON serialization.

pub use crate::services::conflict::ConflictKind;
pub use crate::services::slots::ClassSlotView;
pub use crate::services::sweep::SweepOutcome;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub use crate::models::{ClockTime, TimeRange, DAILY_TIME_GRID};

/// Class slot identifier (store-assigned primary key).
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct SlotId(pub i64);

/// Full routine entry identifier (store-assigned primary key).
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct RoutineId(pub i64);

impl SlotId {
    pub fn new(value: i64) -> Self {
        SlotId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl RoutineId {
    pub fn new(value: i64) -> Self {
        RoutineId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for RoutineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<SlotId> for i64 {
    fn from(id: SlotId) -> Self {
        id.0
    }
}

impl From<RoutineId> for i64 {
    fn from(id: RoutineId) -> Self {
        id.0
    }
}

/// Kind of teaching session a slot holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassType {
    Lab,
    Theory,
}

impl FromStr for ClassType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Lab" => Ok(Self::Lab),
            "Theory" => Ok(Self::Theory),
            other => Err(format!("Unknown class type: {}", other)),
        }
    }
}

impl std::fmt::Display for ClassType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lab => write!(f, "Lab"),
            Self::Theory => write!(f, "Theory"),
        }
    }
}

/// Validated candidate for a class slot.
///
/// The id and the owning batch are assigned by the store at insert time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClassSlot {
    /// Owning semester, by name
    pub semester_name: String,
    /// Weekday label, matching the day reference table
    pub day: String,
    /// Window start
    pub start_time: ClockTime,
    /// Window end (strictly after start)
    pub end_time: ClockTime,
    /// Course reference, by course id
    pub course_id: String,
    /// Teacher reference, by teacher id
    pub teacher_id: String,
    /// Room reference, by room number
    pub room_no: String,
    /// Section label within the semester
    pub section: String,
    /// Lab or Theory
    pub class_type: ClassType,
}

impl NewClassSlot {
    /// The candidate's wall-clock window.
    pub fn time_range(&self) -> TimeRange {
        TimeRange {
            start: self.start_time,
            end: self.end_time,
        }
    }
}

/// Canonical weekly slot assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSlot {
    /// Store-assigned primary key
    pub id: SlotId,
    /// Owning semester, by name
    pub semester_name: String,
    /// Batch owning the semester, stamped at creation
    pub batch_no: String,
    /// Weekday label
    pub day: String,
    /// Window start
    pub start_time: ClockTime,
    /// Window end
    pub end_time: ClockTime,
    /// Course reference
    pub course_id: String,
    /// Teacher reference
    pub teacher_id: String,
    /// Room reference
    pub room_no: String,
    /// Section label
    pub section: String,
    /// Lab or Theory
    pub class_type: ClassType,
}

impl ClassSlot {
    /// The slot's wall-clock window.
    pub fn time_range(&self) -> TimeRange {
        TimeRange {
            start: self.start_time,
            end: self.end_time,
        }
    }

    /// True when every schedule field matches the candidate combination.
    pub fn same_combination(&self, candidate: &NewClassSlot) -> bool {
        self.semester_name == candidate.semester_name
            && self.day == candidate.day
            && self.start_time == candidate.start_time
            && self.end_time == candidate.end_time
            && self.course_id == candidate.course_id
            && self.teacher_id == candidate.teacher_id
            && self.room_no == candidate.room_no
            && self.section == candidate.section
            && self.class_type == candidate.class_type
    }

    /// Overwrite the schedule fields with new values, keeping id and batch.
    pub fn apply_update(&mut self, fields: &NewClassSlot) {
        self.semester_name = fields.semester_name.clone();
        self.day = fields.day.clone();
        self.start_time = fields.start_time;
        self.end_time = fields.end_time;
        self.course_id = fields.course_id.clone();
        self.teacher_id = fields.teacher_id.clone();
        self.room_no = fields.room_no.clone();
        self.section = fields.section.clone();
        self.class_type = fields.class_type;
    }
}

/// Pre-override values of a rescheduled routine entry.
///
/// Only the fields a reschedule may change are captured; everything else is
/// untouched by an override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineSnapshot {
    pub day: String,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    pub room_no: String,
}

/// A requested temporary override of a routine entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineOverride {
    /// New weekday label
    pub day: String,
    /// New window start
    pub start_time: ClockTime,
    /// New window end
    pub end_time: ClockTime,
    /// New room
    pub room_no: String,
    /// Instant the override stops applying
    pub expiration_date: DateTime<Utc>,
}

impl RoutineOverride {
    /// The requested wall-clock window.
    pub fn time_range(&self) -> TimeRange {
        TimeRange {
            start: self.start_time,
            end: self.end_time,
        }
    }
}

/// Mirrored, override-capable projection of a ClassSlot.
///
/// Kept field-for-field in sync with its slot on create/update/delete, and
/// independently reschedulable with an expiration after which the override
/// is rolled back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullRoutineEntry {
    /// Store-assigned primary key
    pub id: RoutineId,
    /// Id of the ClassSlot this entry mirrors
    pub slot_id: SlotId,
    /// Owning semester, by name
    pub semester_name: String,
    /// Batch owning the semester
    pub batch_no: String,
    /// Weekday label (override-capable)
    pub day: String,
    /// Window start (override-capable)
    pub start_time: ClockTime,
    /// Window end (override-capable)
    pub end_time: ClockTime,
    /// Course reference
    pub course_id: String,
    /// Teacher reference
    pub teacher_id: String,
    /// Room reference (override-capable)
    pub room_no: String,
    /// Section label
    pub section: String,
    /// Lab or Theory
    pub class_type: ClassType,
    /// When set, day/time/room carry a temporary override valid until this instant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateTime<Utc>>,
    /// Pre-override values, captured on the first reschedule
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original: Option<RoutineSnapshot>,
}

impl FullRoutineEntry {
    /// Build the mirror entry for a freshly inserted slot.
    pub fn from_slot(id: RoutineId, slot: &ClassSlot) -> Self {
        Self {
            id,
            slot_id: slot.id,
            semester_name: slot.semester_name.clone(),
            batch_no: slot.batch_no.clone(),
            day: slot.day.clone(),
            start_time: slot.start_time,
            end_time: slot.end_time,
            course_id: slot.course_id.clone(),
            teacher_id: slot.teacher_id.clone(),
            room_no: slot.room_no.clone(),
            section: slot.section.clone(),
            class_type: slot.class_type,
            expiration_date: None,
            original: None,
        }
    }

    /// The entry's current wall-clock window.
    pub fn time_range(&self) -> TimeRange {
        TimeRange {
            start: self.start_time,
            end: self.end_time,
        }
    }

    /// True while a temporary override is pending expiry.
    pub fn is_rescheduled(&self) -> bool {
        self.expiration_date.is_some()
    }

    /// Mirror the schedule fields of the (possibly updated) slot.
    ///
    /// Override bookkeeping (expiration, snapshot) is left untouched.
    pub fn sync_from_slot(&mut self, slot: &ClassSlot) {
        self.semester_name = slot.semester_name.clone();
        self.batch_no = slot.batch_no.clone();
        self.day = slot.day.clone();
        self.start_time = slot.start_time;
        self.end_time = slot.end_time;
        self.course_id = slot.course_id.clone();
        self.teacher_id = slot.teacher_id.clone();
        self.room_no = slot.room_no.clone();
        self.section = slot.section.clone();
        self.class_type = slot.class_type;
    }

    /// Apply a temporary override.
    ///
    /// The pre-override day/time/room values are captured on the first
    /// reschedule; a re-reschedule before expiry keeps the first snapshot so
    /// the eventual revert lands on the standing weekly schedule.
    pub fn apply_override(&mut self, change: &RoutineOverride) {
        if self.original.is_none() {
            self.original = Some(RoutineSnapshot {
                day: self.day.clone(),
                start_time: self.start_time,
                end_time: self.end_time,
                room_no: self.room_no.clone(),
            });
        }
        self.day = change.day.clone();
        self.start_time = change.start_time;
        self.end_time = change.end_time;
        self.room_no = change.room_no.clone();
        self.expiration_date = Some(change.expiration_date);
    }

    /// Roll an expired override back to the captured snapshot.
    ///
    /// Restores day/time/room, clears the expiration and the snapshot.
    /// Returns false when there is no snapshot to restore (nothing changes).
    pub fn revert(&mut self) -> bool {
        match self.original.take() {
            Some(snapshot) => {
                self.day = snapshot.day;
                self.start_time = snapshot.start_time;
                self.end_time = snapshot.end_time;
                self.room_no = snapshot.room_no;
                self.expiration_date = None;
                true
            }
            None => false,
        }
    }
}

// ==================== Reference entities ====================
// Externally managed lookup records; the core validates existence by natural
// key and never mutates them.

/// Academic semester.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Semester {
    pub semester_name: String,
}

/// Teaching day, keyed by its label in the weekly grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Day {
    pub day_no: String,
}

/// Course offered in a specific semester.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub course_id: String,
    pub course_name: String,
    /// Semester the course is assigned to; slots must match it
    pub semester_name: String,
}

/// Teacher on record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub teacher_id: String,
    pub teacher_name: String,
}

/// Physical room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub room_no: String,
}

/// Section label usable across semesters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub section_name: String,
}

/// Batch of students tied to a semester.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    pub batch_no: String,
    pub semester_name: String,
}

/// Enrolled student, addressable for notifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub student_id: String,
    pub email: String,
    pub semester_name: String,
}
