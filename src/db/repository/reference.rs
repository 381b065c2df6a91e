//! Reference data repository trait.
//!
//! Lookup records (semesters, days, courses, teachers, rooms, sections,
//! batches, students) are owned by external administration flows; the core
//! only checks existence by natural key and resolves display names. The
//! `store_*` methods exist so deployments and tests can seed the reference
//! collections.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{Batch, Course, Day, Room, Section, Semester, Student, Teacher};

/// Repository trait for reference data lookups.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait ReferenceRepository: Send + Sync {
    // ==================== Lookups ====================

    /// Fetch a semester by name.
    async fn fetch_semester(&self, semester_name: &str) -> RepositoryResult<Option<Semester>>;

    /// Fetch a day by its label.
    async fn fetch_day(&self, day_no: &str) -> RepositoryResult<Option<Day>>;

    /// Fetch a course by course id.
    async fn fetch_course(&self, course_id: &str) -> RepositoryResult<Option<Course>>;

    /// Fetch a teacher by teacher id.
    async fn fetch_teacher(&self, teacher_id: &str) -> RepositoryResult<Option<Teacher>>;

    /// Fetch a room by room number.
    async fn fetch_room(&self, room_no: &str) -> RepositoryResult<Option<Room>>;

    /// Fetch a section by name.
    async fn fetch_section(&self, section_name: &str) -> RepositoryResult<Option<Section>>;

    /// List every known section.
    async fn list_sections(&self) -> RepositoryResult<Vec<Section>>;

    /// Fetch the batch owning a semester.
    async fn batch_for_semester(&self, semester_name: &str) -> RepositoryResult<Option<Batch>>;

    /// List the students enrolled in a semester.
    async fn students_for_semester(&self, semester_name: &str)
        -> RepositoryResult<Vec<Student>>;

    // ==================== Seeding ====================
    // Upserts by natural key.

    /// Store a semester.
    async fn store_semester(&self, semester: Semester) -> RepositoryResult<()>;

    /// Store a day.
    async fn store_day(&self, day: Day) -> RepositoryResult<()>;

    /// Store a course.
    async fn store_course(&self, course: Course) -> RepositoryResult<()>;

    /// Store a teacher.
    async fn store_teacher(&self, teacher: Teacher) -> RepositoryResult<()>;

    /// Store a room.
    async fn store_room(&self, room: Room) -> RepositoryResult<()>;

    /// Store a section.
    async fn store_section(&self, section: Section) -> RepositoryResult<()>;

    /// Store a batch.
    async fn store_batch(&self, batch: Batch) -> RepositoryResult<()>;

    /// Store a student.
    async fn store_student(&self, student: Student) -> RepositoryResult<()>;
}
