//! In-memory repository implementation.
//!
//! Backs the `local-repo` feature: a process-local store for development
//! and tests. All collections live behind one `RwLock`, so a slot mutation
//! and its mirror write commit under the same guard and the two collections
//! cannot diverge.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;

use crate::api::{
    Batch, ClassSlot, Course, Day, FullRoutineEntry, NewClassSlot, Room, RoutineId,
    RoutineOverride, Section, Semester, SlotId, Student, Teacher, TimeRange,
};
use crate::db::repository::error::{ErrorContext, RepositoryError, RepositoryResult};
use crate::db::repository::{ReferenceRepository, RoutineRepository, SlotRepository};

/// All collections of the store.
///
/// Slot and routine ids are assigned from per-collection counters; reference
/// collections are keyed by their natural keys.
#[derive(Default)]
struct Collections {
    slots: HashMap<i64, ClassSlot>,
    routines: HashMap<i64, FullRoutineEntry>,
    semesters: HashMap<String, Semester>,
    days: HashMap<String, Day>,
    courses: HashMap<String, Course>,
    teachers: HashMap<String, Teacher>,
    rooms: HashMap<String, Room>,
    sections: HashMap<String, Section>,
    /// Keyed by semester name, the only lookup the core performs.
    batches: HashMap<String, Batch>,
    students: HashMap<String, Student>,
    next_slot_id: i64,
    next_routine_id: i64,
}

/// In-memory repository.
pub struct LocalRepository {
    inner: RwLock<Collections>,
}

impl LocalRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Collections::default()),
        }
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn sorted_by_id<T, F>(mut items: Vec<T>, key: F) -> Vec<T>
where
    F: Fn(&T) -> i64,
{
    items.sort_by_key(|item| key(item));
    items
}

// =============================================================================
// SlotRepository
// =============================================================================

#[async_trait]
impl SlotRepository for LocalRepository {
    async fn insert_slot(&self, batch_no: &str, slot: &NewClassSlot) -> RepositoryResult<ClassSlot> {
        let mut inner = self.inner.write();

        if TimeRange::new(slot.start_time, slot.end_time).is_none() {
            return Err(RepositoryError::validation_with_context(
                "end_time must be strictly after start_time",
                ErrorContext::new("insert_slot").with_entity("class_slot"),
            ));
        }
        if inner.slots.values().any(|existing| existing.same_combination(slot)) {
            return Err(RepositoryError::duplicate_with_context(
                "Class slot already exists for the given combination",
                ErrorContext::new("insert_slot").with_entity("class_slot"),
            ));
        }

        inner.next_slot_id += 1;
        let stored = ClassSlot {
            id: SlotId::new(inner.next_slot_id),
            semester_name: slot.semester_name.clone(),
            batch_no: batch_no.to_string(),
            day: slot.day.clone(),
            start_time: slot.start_time,
            end_time: slot.end_time,
            course_id: slot.course_id.clone(),
            teacher_id: slot.teacher_id.clone(),
            room_no: slot.room_no.clone(),
            section: slot.section.clone(),
            class_type: slot.class_type,
        };
        inner.slots.insert(stored.id.value(), stored.clone());

        // Mirror write under the same guard.
        inner.next_routine_id += 1;
        let mirror = FullRoutineEntry::from_slot(RoutineId::new(inner.next_routine_id), &stored);
        inner.routines.insert(mirror.id.value(), mirror);

        Ok(stored)
    }

    async fn update_slot(&self, id: SlotId, fields: &NewClassSlot) -> RepositoryResult<ClassSlot> {
        let mut inner = self.inner.write();

        if TimeRange::new(fields.start_time, fields.end_time).is_none() {
            return Err(RepositoryError::validation_with_context(
                "end_time must be strictly after start_time",
                ErrorContext::new("update_slot")
                    .with_entity("class_slot")
                    .with_entity_id(id),
            ));
        }
        if inner
            .slots
            .values()
            .any(|existing| existing.id != id && existing.same_combination(fields))
        {
            return Err(RepositoryError::duplicate_with_context(
                "Class slot already exists for the given combination",
                ErrorContext::new("update_slot")
                    .with_entity("class_slot")
                    .with_entity_id(id),
            ));
        }

        let updated = match inner.slots.get_mut(&id.value()) {
            Some(slot) => {
                slot.apply_update(fields);
                slot.clone()
            }
            None => {
                return Err(RepositoryError::not_found_with_context(
                    "Class slot not found",
                    ErrorContext::new("update_slot")
                        .with_entity("class_slot")
                        .with_entity_id(id),
                ))
            }
        };

        // Mirror sync by stored slot id; a missing mirror is recreated so the
        // one-entry-per-slot invariant holds.
        match inner
            .routines
            .values_mut()
            .find(|entry| entry.slot_id == id)
        {
            Some(entry) => entry.sync_from_slot(&updated),
            None => {
                inner.next_routine_id += 1;
                let mirror =
                    FullRoutineEntry::from_slot(RoutineId::new(inner.next_routine_id), &updated);
                inner.routines.insert(mirror.id.value(), mirror);
            }
        }

        Ok(updated)
    }

    async fn delete_slot(&self, id: SlotId) -> RepositoryResult<ClassSlot> {
        let mut inner = self.inner.write();

        let removed = inner.slots.remove(&id.value()).ok_or_else(|| {
            RepositoryError::not_found_with_context(
                "Class slot not found",
                ErrorContext::new("delete_slot")
                    .with_entity("class_slot")
                    .with_entity_id(id),
            )
        })?;
        inner.routines.retain(|_, entry| entry.slot_id != id);

        Ok(removed)
    }

    async fn fetch_slot(&self, id: SlotId) -> RepositoryResult<Option<ClassSlot>> {
        let inner = self.inner.read();
        Ok(inner.slots.get(&id.value()).cloned())
    }

    async fn list_slots(&self) -> RepositoryResult<Vec<ClassSlot>> {
        let inner = self.inner.read();
        Ok(sorted_by_id(
            inner.slots.values().cloned().collect(),
            |slot| slot.id.value(),
        ))
    }

    async fn slots_for_semester(&self, semester_name: &str) -> RepositoryResult<Vec<ClassSlot>> {
        let inner = self.inner.read();
        Ok(sorted_by_id(
            inner
                .slots
                .values()
                .filter(|slot| slot.semester_name == semester_name)
                .cloned()
                .collect(),
            |slot| slot.id.value(),
        ))
    }

    async fn slots_for_semester_day(
        &self,
        semester_name: &str,
        day: &str,
    ) -> RepositoryResult<Vec<ClassSlot>> {
        let inner = self.inner.read();
        Ok(sorted_by_id(
            inner
                .slots
                .values()
                .filter(|slot| slot.semester_name == semester_name && slot.day == day)
                .cloned()
                .collect(),
            |slot| slot.id.value(),
        ))
    }

    async fn slots_for_day_room(
        &self,
        day: &str,
        room_no: &str,
    ) -> RepositoryResult<Vec<ClassSlot>> {
        let inner = self.inner.read();
        Ok(sorted_by_id(
            inner
                .slots
                .values()
                .filter(|slot| slot.day == day && slot.room_no == room_no)
                .cloned()
                .collect(),
            |slot| slot.id.value(),
        ))
    }

    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}

// =============================================================================
// RoutineRepository
// =============================================================================

#[async_trait]
impl RoutineRepository for LocalRepository {
    async fn fetch_routine(&self, id: RoutineId) -> RepositoryResult<Option<FullRoutineEntry>> {
        let inner = self.inner.read();
        Ok(inner.routines.get(&id.value()).cloned())
    }

    async fn list_routines(&self) -> RepositoryResult<Vec<FullRoutineEntry>> {
        let inner = self.inner.read();
        Ok(sorted_by_id(
            inner.routines.values().cloned().collect(),
            |entry| entry.id.value(),
        ))
    }

    async fn routine_for_slot(
        &self,
        slot_id: SlotId,
    ) -> RepositoryResult<Option<FullRoutineEntry>> {
        let inner = self.inner.read();
        Ok(inner
            .routines
            .values()
            .find(|entry| entry.slot_id == slot_id)
            .cloned())
    }

    async fn apply_override(
        &self,
        id: RoutineId,
        change: &RoutineOverride,
    ) -> RepositoryResult<FullRoutineEntry> {
        let mut inner = self.inner.write();

        if TimeRange::new(change.start_time, change.end_time).is_none() {
            return Err(RepositoryError::validation_with_context(
                "end_time must be strictly after start_time",
                ErrorContext::new("apply_override")
                    .with_entity("routine")
                    .with_entity_id(id),
            ));
        }

        match inner.routines.get_mut(&id.value()) {
            Some(entry) => {
                entry.apply_override(change);
                Ok(entry.clone())
            }
            None => Err(RepositoryError::not_found_with_context(
                "Routine not found",
                ErrorContext::new("apply_override")
                    .with_entity("routine")
                    .with_entity_id(id),
            )),
        }
    }

    async fn expired_routines(
        &self,
        now: DateTime<Utc>,
    ) -> RepositoryResult<Vec<FullRoutineEntry>> {
        let inner = self.inner.read();
        Ok(sorted_by_id(
            inner
                .routines
                .values()
                .filter(|entry| matches!(entry.expiration_date, Some(expiry) if expiry <= now))
                .cloned()
                .collect(),
            |entry| entry.id.value(),
        ))
    }

    async fn revert_routine(&self, id: RoutineId) -> RepositoryResult<FullRoutineEntry> {
        let mut inner = self.inner.write();

        match inner.routines.get_mut(&id.value()) {
            Some(entry) => {
                entry.revert();
                Ok(entry.clone())
            }
            None => Err(RepositoryError::not_found_with_context(
                "Routine not found",
                ErrorContext::new("revert_routine")
                    .with_entity("routine")
                    .with_entity_id(id),
            )),
        }
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> RepositoryResult<usize> {
        let mut inner = self.inner.write();

        let before = inner.routines.len();
        inner
            .routines
            .retain(|_, entry| !matches!(entry.expiration_date, Some(expiry) if expiry <= now));
        Ok(before - inner.routines.len())
    }
}

// =============================================================================
// ReferenceRepository
// =============================================================================

#[async_trait]
impl ReferenceRepository for LocalRepository {
    async fn fetch_semester(&self, semester_name: &str) -> RepositoryResult<Option<Semester>> {
        let inner = self.inner.read();
        Ok(inner.semesters.get(semester_name).cloned())
    }

    async fn fetch_day(&self, day_no: &str) -> RepositoryResult<Option<Day>> {
        let inner = self.inner.read();
        Ok(inner.days.get(day_no).cloned())
    }

    async fn fetch_course(&self, course_id: &str) -> RepositoryResult<Option<Course>> {
        let inner = self.inner.read();
        Ok(inner.courses.get(course_id).cloned())
    }

    async fn fetch_teacher(&self, teacher_id: &str) -> RepositoryResult<Option<Teacher>> {
        let inner = self.inner.read();
        Ok(inner.teachers.get(teacher_id).cloned())
    }

    async fn fetch_room(&self, room_no: &str) -> RepositoryResult<Option<Room>> {
        let inner = self.inner.read();
        Ok(inner.rooms.get(room_no).cloned())
    }

    async fn fetch_section(&self, section_name: &str) -> RepositoryResult<Option<Section>> {
        let inner = self.inner.read();
        Ok(inner.sections.get(section_name).cloned())
    }

    async fn list_sections(&self) -> RepositoryResult<Vec<Section>> {
        let inner = self.inner.read();
        let mut sections: Vec<Section> = inner.sections.values().cloned().collect();
        sections.sort_by(|a, b| a.section_name.cmp(&b.section_name));
        Ok(sections)
    }

    async fn batch_for_semester(&self, semester_name: &str) -> RepositoryResult<Option<Batch>> {
        let inner = self.inner.read();
        Ok(inner.batches.get(semester_name).cloned())
    }

    async fn students_for_semester(
        &self,
        semester_name: &str,
    ) -> RepositoryResult<Vec<Student>> {
        let inner = self.inner.read();
        let mut students: Vec<Student> = inner
            .students
            .values()
            .filter(|student| student.semester_name == semester_name)
            .cloned()
            .collect();
        students.sort_by(|a, b| a.student_id.cmp(&b.student_id));
        Ok(students)
    }

    async fn store_semester(&self, semester: Semester) -> RepositoryResult<()> {
        let mut inner = self.inner.write();
        inner
            .semesters
            .insert(semester.semester_name.clone(), semester);
        Ok(())
    }

    async fn store_day(&self, day: Day) -> RepositoryResult<()> {
        let mut inner = self.inner.write();
        inner.days.insert(day.day_no.clone(), day);
        Ok(())
    }

    async fn store_course(&self, course: Course) -> RepositoryResult<()> {
        let mut inner = self.inner.write();
        inner.courses.insert(course.course_id.clone(), course);
        Ok(())
    }

    async fn store_teacher(&self, teacher: Teacher) -> RepositoryResult<()> {
        let mut inner = self.inner.write();
        inner.teachers.insert(teacher.teacher_id.clone(), teacher);
        Ok(())
    }

    async fn store_room(&self, room: Room) -> RepositoryResult<()> {
        let mut inner = self.inner.write();
        inner.rooms.insert(room.room_no.clone(), room);
        Ok(())
    }

    async fn store_section(&self, section: Section) -> RepositoryResult<()> {
        let mut inner = self.inner.write();
        inner.sections.insert(section.section_name.clone(), section);
        Ok(())
    }

    async fn store_batch(&self, batch: Batch) -> RepositoryResult<()> {
        let mut inner = self.inner.write();
        inner.batches.insert(batch.semester_name.clone(), batch);
        Ok(())
    }

    async fn store_student(&self, student: Student) -> RepositoryResult<()> {
        let mut inner = self.inner.write();
        inner.students.insert(student.student_id.clone(), student);
        Ok(())
    }
}
