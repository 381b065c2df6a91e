//! Class slot orchestration.
//!
//! Carries a submission through the validation ladder (field presence, time
//! ordering, reference existence, class type, course/semester consistency,
//! overlap scan), resolves the owning batch, and persists through the
//! repository's dual-write path. Read paths return slots joined with the
//! teacher's display name.
//!
//! The ladder checks run in a fixed order and each failure is reported on
//! its own; a request never accumulates multiple failure kinds. Conflict
//! messages are the one exception: every triggered category is returned
//! together.

use serde::{Deserialize, Serialize};

use crate::api::{ClassSlot, ClassType, ClockTime, NewClassSlot, SlotId, DAILY_TIME_GRID};
use crate::db::FullRepository;
use crate::services::conflict;
use crate::services::error::{ServiceError, ServiceResult};

/// Raw create/update payload as submitted by clients.
///
/// Every field arrives as a string; `#[serde(default)]` turns absent JSON
/// keys into empty strings so presence is checked in one place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SlotSubmission {
    pub semester_name: String,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    pub course_id: String,
    pub teacher_id: String,
    pub room_no: String,
    pub section: String,
    pub class_type: String,
}

impl SlotSubmission {
    /// True when any required field is absent or blank.
    pub fn has_missing_fields(&self) -> bool {
        [
            &self.semester_name,
            &self.day,
            &self.start_time,
            &self.end_time,
            &self.course_id,
            &self.teacher_id,
            &self.room_no,
            &self.section,
            &self.class_type,
        ]
        .iter()
        .any(|field| field.trim().is_empty())
    }
}

/// A class slot joined with its teacher's display name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSlotView {
    #[serde(flatten)]
    pub slot: ClassSlot,
    /// Resolved display name, `"N/A"` when the teacher record is missing
    pub teacher_name: String,
}

// ==================== Validation ladder ====================

/// Run a submission through the full ladder and produce a typed candidate.
///
/// On update the slot being replaced is excluded from the overlap scan.
async fn validate(
    repo: &dyn FullRepository,
    submission: &SlotSubmission,
    exclude: Option<SlotId>,
) -> ServiceResult<NewClassSlot> {
    if submission.has_missing_fields() {
        return Err(ServiceError::validation("Missing required fields"));
    }

    let start_time: ClockTime = submission
        .start_time
        .parse()
        .map_err(|_| ServiceError::validation("Invalid time format"))?;
    let end_time: ClockTime = submission
        .end_time
        .parse()
        .map_err(|_| ServiceError::validation("Invalid time format"))?;
    if end_time <= start_time {
        return Err(ServiceError::validation("End time must be after start time"));
    }

    if repo.fetch_semester(&submission.semester_name).await?.is_none() {
        return Err(ServiceError::not_found("Semester not found"));
    }
    if repo.fetch_day(&submission.day).await?.is_none() {
        return Err(ServiceError::not_found("Day not found"));
    }
    let course = repo
        .fetch_course(&submission.course_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Course not found"))?;
    if repo.fetch_teacher(&submission.teacher_id).await?.is_none() {
        return Err(ServiceError::not_found("Teacher not found"));
    }
    if repo.fetch_room(&submission.room_no).await?.is_none() {
        return Err(ServiceError::not_found("Room not found"));
    }
    if repo.fetch_section(&submission.section).await?.is_none() {
        return Err(ServiceError::not_found("Section not found"));
    }

    let class_type: ClassType = submission
        .class_type
        .parse()
        .map_err(|_| ServiceError::validation("Invalid class type"))?;

    if course.semester_name != submission.semester_name {
        return Err(ServiceError::cross_field(
            format!(
                "Course {} is assigned to semester {}, but you are trying to use it in semester {}.",
                course.course_id, course.semester_name, submission.semester_name
            ),
            format!(
                "Please use the course in its assigned semester ({}).",
                course.semester_name
            ),
        ));
    }

    let candidate = NewClassSlot {
        semester_name: submission.semester_name.clone(),
        day: submission.day.clone(),
        start_time,
        end_time,
        course_id: submission.course_id.clone(),
        teacher_id: submission.teacher_id.clone(),
        room_no: submission.room_no.clone(),
        section: submission.section.clone(),
        class_type,
    };

    let existing = repo
        .slots_for_semester_day(&candidate.semester_name, &candidate.day)
        .await?;
    let conflicts = conflict::find_conflicts(&candidate, &existing, exclude);
    if !conflicts.is_empty() {
        return Err(ServiceError::conflicts(conflict::conflict_messages(
            &conflicts,
        )));
    }

    Ok(candidate)
}

// ==================== Mutations ====================

/// Validate a submission and persist the new slot plus its mirror entry.
pub async fn create_slot(
    repo: &dyn FullRepository,
    submission: &SlotSubmission,
) -> ServiceResult<ClassSlot> {
    let candidate = validate(repo, submission, None).await?;

    let batch = repo
        .batch_for_semester(&candidate.semester_name)
        .await?
        .ok_or_else(|| ServiceError::not_found("Batch not found for the given semester"))?;

    let created = repo.insert_slot(&batch.batch_no, &candidate).await?;
    log::info!(
        "created class slot {} ({} {} {}-{})",
        created.id,
        created.semester_name,
        created.day,
        created.start_time,
        created.end_time
    );
    Ok(created)
}

/// Re-validate a submission and overwrite an existing slot.
///
/// The slot's own booking is excluded from the overlap scan so a slot never
/// conflicts with itself; the mirror entry is refreshed in the same store
/// operation.
pub async fn update_slot(
    repo: &dyn FullRepository,
    id: SlotId,
    submission: &SlotSubmission,
) -> ServiceResult<ClassSlot> {
    let candidate = validate(repo, submission, Some(id)).await?;
    let updated = repo.update_slot(id, &candidate).await?;
    log::info!("updated class slot {}", updated.id);
    Ok(updated)
}

/// Delete a slot together with its mirror entry.
pub async fn delete_slot(repo: &dyn FullRepository, id: SlotId) -> ServiceResult<ClassSlot> {
    let removed = repo.delete_slot(id).await?;
    log::info!("deleted class slot {}", removed.id);
    Ok(removed)
}

// ==================== Reads ====================

async fn enrich(repo: &dyn FullRepository, slot: ClassSlot) -> ServiceResult<ClassSlotView> {
    let teacher_name = match repo.fetch_teacher(&slot.teacher_id).await? {
        Some(teacher) => teacher.teacher_name,
        None => "N/A".to_string(),
    };
    Ok(ClassSlotView { slot, teacher_name })
}

async fn enrich_all(
    repo: &dyn FullRepository,
    slots: Vec<ClassSlot>,
) -> ServiceResult<Vec<ClassSlotView>> {
    let mut views = Vec::with_capacity(slots.len());
    for slot in slots {
        views.push(enrich(repo, slot).await?);
    }
    Ok(views)
}

/// Fetch one slot by id, joined with the teacher's display name.
pub async fn get_slot(repo: &dyn FullRepository, id: SlotId) -> ServiceResult<ClassSlotView> {
    let slot = repo
        .fetch_slot(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Class slot not found"))?;
    enrich(repo, slot).await
}

/// List every slot, joined with teacher display names.
pub async fn list_slots(repo: &dyn FullRepository) -> ServiceResult<Vec<ClassSlotView>> {
    let slots = repo.list_slots().await?;
    enrich_all(repo, slots).await
}

/// List one semester's slots, joined with teacher display names.
pub async fn slots_for_semester(
    repo: &dyn FullRepository,
    semester_name: &str,
) -> ServiceResult<Vec<ClassSlotView>> {
    let slots = repo.slots_for_semester(semester_name).await?;
    enrich_all(repo, slots).await
}

/// The fixed ordered set of selectable daily time windows.
pub fn time_slots() -> Vec<&'static str> {
    DAILY_TIME_GRID.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_submission() -> SlotSubmission {
        SlotSubmission {
            semester_name: "Fall2024".to_string(),
            day: "Monday".to_string(),
            start_time: "9:00".to_string(),
            end_time: "9:50".to_string(),
            course_id: "CS101".to_string(),
            teacher_id: "T1".to_string(),
            room_no: "R101".to_string(),
            section: "A".to_string(),
            class_type: "Theory".to_string(),
        }
    }

    #[test]
    fn test_complete_submission_has_no_missing_fields() {
        assert!(!filled_submission().has_missing_fields());
    }

    #[test]
    fn test_blank_field_counts_as_missing() {
        let mut submission = filled_submission();
        submission.room_no = "   ".to_string();
        assert!(submission.has_missing_fields());
    }

    #[test]
    fn test_absent_json_keys_become_missing_fields() {
        let submission: SlotSubmission =
            serde_json::from_str(r#"{"semesterName": "Fall2024"}"#).unwrap();
        assert!(submission.has_missing_fields());
    }

    #[test]
    fn test_submission_accepts_camel_case_payload() {
        let submission: SlotSubmission = serde_json::from_str(
            r#"{
                "semesterName": "Fall2024",
                "day": "Monday",
                "startTime": "9:00",
                "endTime": "9:50",
                "courseId": "CS101",
                "teacherId": "T1",
                "roomNo": "R101",
                "section": "A",
                "classType": "Theory"
            }"#,
        )
        .unwrap();
        assert_eq!(submission, filled_submission());
    }

    #[test]
    fn test_view_serializes_flat_with_teacher_name() {
        let view = ClassSlotView {
            slot: ClassSlot {
                id: SlotId::new(3),
                semester_name: "Fall2024".to_string(),
                batch_no: "27".to_string(),
                day: "Monday".to_string(),
                start_time: "9:00".parse().unwrap(),
                end_time: "9:50".parse().unwrap(),
                course_id: "CS101".to_string(),
                teacher_id: "T1".to_string(),
                room_no: "R101".to_string(),
                section: "A".to_string(),
                class_type: ClassType::Theory,
            },
            teacher_name: "Dr. Rahman".to_string(),
        };

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["teacherName"], "Dr. Rahman");
        assert_eq!(json["semesterName"], "Fall2024");
        assert!(json.get("slot").is_none());
    }

    #[test]
    fn test_time_slots_expose_the_daily_grid() {
        let slots = time_slots();
        assert_eq!(slots.len(), 8);
        assert_eq!(slots[0], "8:00-8:50");
        assert_eq!(slots[7], "16:00-16:50");
    }
}
