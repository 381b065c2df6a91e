use chrono::{DateTime, TimeZone, Utc};

use rms_rust::api::{
    Batch, ClassType, ClockTime, NewClassSlot, RoutineId, RoutineOverride, Section, Semester,
    SlotId, Student,
};
use rms_rust::db::repositories::LocalRepository;
use rms_rust::db::repository::{
    ReferenceRepository, RepositoryError, RoutineRepository, SlotRepository,
};

fn t(s: &str) -> ClockTime {
    s.parse().unwrap()
}

fn slot(day: &str, start: &str, end: &str, room: &str, section: &str) -> NewClassSlot {
    NewClassSlot {
        semester_name: "Fall2024".to_string(),
        day: day.to_string(),
        start_time: t(start),
        end_time: t(end),
        course_id: "CSE101".to_string(),
        teacher_id: "T1".to_string(),
        room_no: room.to_string(),
        section: section.to_string(),
        class_type: ClassType::Theory,
    }
}

fn override_to(
    day: &str,
    start: &str,
    end: &str,
    room: &str,
    expires: DateTime<Utc>,
) -> RoutineOverride {
    RoutineOverride {
        day: day.to_string(),
        start_time: t(start),
        end_time: t(end),
        room_no: room.to_string(),
        expiration_date: expires,
    }
}

fn march(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, day, 0, 0, 0).unwrap()
}

// =========================================================
// Slot store and mirror dual-write
// =========================================================

#[tokio::test]
async fn test_insert_assigns_id_and_stamps_batch() {
    let repo = LocalRepository::new();

    let created = repo
        .insert_slot("27", &slot("Monday", "9:00", "9:50", "R101", "A"))
        .await
        .unwrap();

    assert!(created.id.value() > 0);
    assert_eq!(created.batch_no, "27");
    assert_eq!(created.semester_name, "Fall2024");
}

#[tokio::test]
async fn test_insert_creates_mirror_entry() {
    let repo = LocalRepository::new();

    let created = repo
        .insert_slot("27", &slot("Monday", "9:00", "9:50", "R101", "A"))
        .await
        .unwrap();

    let mirror = repo.routine_for_slot(created.id).await.unwrap().unwrap();
    assert_eq!(mirror.slot_id, created.id);
    assert_eq!(mirror.semester_name, created.semester_name);
    assert_eq!(mirror.batch_no, "27");
    assert_eq!(mirror.day, "Monday");
    assert_eq!(mirror.start_time, t("9:00"));
    assert_eq!(mirror.end_time, t("9:50"));
    assert_eq!(mirror.room_no, "R101");
    assert!(mirror.expiration_date.is_none());
    assert!(mirror.original.is_none());
    assert!(!mirror.is_rescheduled());
}

#[tokio::test]
async fn test_insert_rejects_duplicate_combination() {
    let repo = LocalRepository::new();

    let fields = slot("Monday", "9:00", "9:50", "R101", "A");
    repo.insert_slot("27", &fields).await.unwrap();
    let err = repo.insert_slot("27", &fields).await.unwrap_err();

    assert!(matches!(err, RepositoryError::Duplicate { .. }));
    assert_eq!(repo.list_slots().await.unwrap().len(), 1);
    assert_eq!(repo.list_routines().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_insert_rejects_inverted_window() {
    let repo = LocalRepository::new();

    let err = repo
        .insert_slot("27", &slot("Monday", "10:00", "9:00", "R101", "A"))
        .await
        .unwrap_err();

    assert!(matches!(err, RepositoryError::ValidationError { .. }));
    assert!(repo.list_slots().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_overwrites_fields_and_syncs_mirror() {
    let repo = LocalRepository::new();

    let created = repo
        .insert_slot("27", &slot("Monday", "9:00", "9:50", "R101", "A"))
        .await
        .unwrap();
    let mirror_before = repo.routine_for_slot(created.id).await.unwrap().unwrap();

    let updated = repo
        .update_slot(created.id, &slot("Wednesday", "11:00", "11:50", "R102", "A"))
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.day, "Wednesday");
    assert_eq!(updated.room_no, "R102");

    let mirror = repo.routine_for_slot(created.id).await.unwrap().unwrap();
    assert_eq!(mirror.id, mirror_before.id);
    assert_eq!(mirror.day, "Wednesday");
    assert_eq!(mirror.start_time, t("11:00"));
    assert_eq!(mirror.end_time, t("11:50"));
    assert_eq!(mirror.room_no, "R102");
}

#[tokio::test]
async fn test_update_rejects_duplicate_of_other_slot() {
    let repo = LocalRepository::new();

    repo.insert_slot("27", &slot("Monday", "9:00", "9:50", "R101", "A"))
        .await
        .unwrap();
    let second = repo
        .insert_slot("27", &slot("Tuesday", "10:00", "10:50", "R102", "A"))
        .await
        .unwrap();

    let err = repo
        .update_slot(second.id, &slot("Monday", "9:00", "9:50", "R101", "A"))
        .await
        .unwrap_err();

    assert!(matches!(err, RepositoryError::Duplicate { .. }));
}

#[tokio::test]
async fn test_update_same_fields_does_not_trip_duplicate_check() {
    let repo = LocalRepository::new();

    let fields = slot("Monday", "9:00", "9:50", "R101", "A");
    let created = repo.insert_slot("27", &fields).await.unwrap();

    // Overwriting a slot with its own combination is a no-op update.
    let updated = repo.update_slot(created.id, &fields).await.unwrap();
    assert_eq!(updated.id, created.id);
}

#[tokio::test]
async fn test_update_missing_slot_not_found() {
    let repo = LocalRepository::new();

    let err = repo
        .update_slot(SlotId::new(999), &slot("Monday", "9:00", "9:50", "R101", "A"))
        .await
        .unwrap_err();

    assert!(matches!(err, RepositoryError::NotFound { .. }));
}

#[tokio::test]
async fn test_update_keeps_override_bookkeeping() {
    let repo = LocalRepository::new();

    let created = repo
        .insert_slot("27", &slot("Monday", "9:00", "9:50", "R101", "A"))
        .await
        .unwrap();
    let mirror = repo.routine_for_slot(created.id).await.unwrap().unwrap();
    repo.apply_override(
        mirror.id,
        &override_to("Tuesday", "11:00", "11:50", "R202", march(20)),
    )
    .await
    .unwrap();

    repo.update_slot(created.id, &slot("Monday", "10:00", "10:50", "R101", "A"))
        .await
        .unwrap();

    let synced = repo.routine_for_slot(created.id).await.unwrap().unwrap();
    assert_eq!(synced.start_time, t("10:00"));
    assert!(synced.expiration_date.is_some());
    assert!(synced.original.is_some());
}

#[tokio::test]
async fn test_update_recreates_missing_mirror() {
    let repo = LocalRepository::new();

    let created = repo
        .insert_slot("27", &slot("Monday", "9:00", "9:50", "R101", "A"))
        .await
        .unwrap();
    let mirror = repo.routine_for_slot(created.id).await.unwrap().unwrap();

    // Expire and purge the mirror out from under the slot.
    repo.apply_override(
        mirror.id,
        &override_to("Tuesday", "11:00", "11:50", "R202", march(10)),
    )
    .await
    .unwrap();
    assert_eq!(repo.purge_expired(march(15)).await.unwrap(), 1);
    assert!(repo.routine_for_slot(created.id).await.unwrap().is_none());

    repo.update_slot(created.id, &slot("Monday", "10:00", "10:50", "R101", "A"))
        .await
        .unwrap();

    let recreated = repo.routine_for_slot(created.id).await.unwrap().unwrap();
    assert_eq!(recreated.start_time, t("10:00"));
    assert!(recreated.expiration_date.is_none());
    assert!(recreated.original.is_none());
}

#[tokio::test]
async fn test_delete_removes_slot_and_mirror() {
    let repo = LocalRepository::new();

    let created = repo
        .insert_slot("27", &slot("Monday", "9:00", "9:50", "R101", "A"))
        .await
        .unwrap();

    let removed = repo.delete_slot(created.id).await.unwrap();
    assert_eq!(removed.id, created.id);
    assert!(repo.fetch_slot(created.id).await.unwrap().is_none());
    assert!(repo.routine_for_slot(created.id).await.unwrap().is_none());
    assert!(repo.list_routines().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_missing_slot_not_found() {
    let repo = LocalRepository::new();

    let err = repo.delete_slot(SlotId::new(42)).await.unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));
}

#[tokio::test]
async fn test_list_slots_sorted_by_id() {
    let repo = LocalRepository::new();

    repo.insert_slot("27", &slot("Monday", "9:00", "9:50", "R101", "A"))
        .await
        .unwrap();
    repo.insert_slot("27", &slot("Tuesday", "10:00", "10:50", "R101", "A"))
        .await
        .unwrap();
    repo.insert_slot("27", &slot("Wednesday", "11:00", "11:50", "R101", "A"))
        .await
        .unwrap();

    let slots = repo.list_slots().await.unwrap();
    assert_eq!(slots.len(), 3);
    assert!(slots.windows(2).all(|w| w[0].id.value() < w[1].id.value()));
}

#[tokio::test]
async fn test_day_room_scan_crosses_semesters() {
    let repo = LocalRepository::new();

    repo.insert_slot("27", &slot("Monday", "9:00", "9:50", "R101", "A"))
        .await
        .unwrap();
    let mut other_semester = slot("Monday", "10:00", "10:50", "R101", "A");
    other_semester.semester_name = "Spring2025".to_string();
    repo.insert_slot("31", &other_semester).await.unwrap();
    repo.insert_slot("27", &slot("Monday", "9:00", "9:50", "R102", "A"))
        .await
        .unwrap();

    let booked = repo.slots_for_day_room("Monday", "R101").await.unwrap();
    assert_eq!(booked.len(), 2);
    assert!(booked.iter().all(|s| s.room_no == "R101"));

    let scoped = repo
        .slots_for_semester_day("Fall2024", "Monday")
        .await
        .unwrap();
    assert_eq!(scoped.len(), 2);
    assert!(scoped.iter().all(|s| s.semester_name == "Fall2024"));
}

#[tokio::test]
async fn test_health_check() {
    let repo = LocalRepository::new();
    assert!(repo.health_check().await.unwrap());
}

// =========================================================
// Routine overrides and expiry
// =========================================================

#[tokio::test]
async fn test_apply_override_missing_routine_not_found() {
    let repo = LocalRepository::new();

    let err = repo
        .apply_override(
            RoutineId::new(999),
            &override_to("Tuesday", "11:00", "11:50", "R202", march(20)),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, RepositoryError::NotFound { .. }));
}

#[tokio::test]
async fn test_apply_override_captures_snapshot_once() {
    let repo = LocalRepository::new();

    let created = repo
        .insert_slot("27", &slot("Monday", "9:00", "9:50", "R101", "A"))
        .await
        .unwrap();
    let mirror = repo.routine_for_slot(created.id).await.unwrap().unwrap();

    repo.apply_override(
        mirror.id,
        &override_to("Tuesday", "11:00", "11:50", "R202", march(20)),
    )
    .await
    .unwrap();
    let twice = repo
        .apply_override(
            mirror.id,
            &override_to("Wednesday", "12:00", "12:50", "R203", march(25)),
        )
        .await
        .unwrap();

    assert_eq!(twice.day, "Wednesday");
    let snapshot = twice.original.unwrap();
    assert_eq!(snapshot.day, "Monday");
    assert_eq!(snapshot.start_time, t("9:00"));
    assert_eq!(snapshot.room_no, "R101");
}

#[tokio::test]
async fn test_expired_routines_splits_on_instant() {
    let repo = LocalRepository::new();

    for (day, start, end, expires) in [
        ("Monday", "9:00", "9:50", march(10)),
        ("Tuesday", "10:00", "10:50", march(15)),
        ("Wednesday", "11:00", "11:50", march(20)),
    ] {
        let created = repo
            .insert_slot("27", &slot(day, start, end, "R101", "A"))
            .await
            .unwrap();
        let mirror = repo.routine_for_slot(created.id).await.unwrap().unwrap();
        repo.apply_override(mirror.id, &override_to(day, "13:00", "13:50", "R202", expires))
            .await
            .unwrap();
    }

    // An expiration equal to the probe instant counts as expired.
    let expired = repo.expired_routines(march(15)).await.unwrap();
    assert_eq!(expired.len(), 2);
    assert!(expired
        .iter()
        .all(|entry| entry.expiration_date.unwrap() <= march(15)));
}

#[tokio::test]
async fn test_revert_routine_restores_snapshot() {
    let repo = LocalRepository::new();

    let created = repo
        .insert_slot("27", &slot("Monday", "9:00", "9:50", "R101", "A"))
        .await
        .unwrap();
    let mirror = repo.routine_for_slot(created.id).await.unwrap().unwrap();
    repo.apply_override(
        mirror.id,
        &override_to("Tuesday", "11:00", "11:50", "R202", march(10)),
    )
    .await
    .unwrap();

    let reverted = repo.revert_routine(mirror.id).await.unwrap();
    assert_eq!(reverted.day, "Monday");
    assert_eq!(reverted.start_time, t("9:00"));
    assert_eq!(reverted.end_time, t("9:50"));
    assert_eq!(reverted.room_no, "R101");
    assert!(reverted.expiration_date.is_none());
    assert!(reverted.original.is_none());
}

#[tokio::test]
async fn test_revert_without_snapshot_is_noop() {
    let repo = LocalRepository::new();

    let created = repo
        .insert_slot("27", &slot("Monday", "9:00", "9:50", "R101", "A"))
        .await
        .unwrap();
    let mirror = repo.routine_for_slot(created.id).await.unwrap().unwrap();

    let untouched = repo.revert_routine(mirror.id).await.unwrap();
    assert_eq!(untouched.day, "Monday");
    assert!(untouched.expiration_date.is_none());
}

#[tokio::test]
async fn test_purge_expired_removes_only_expired() {
    let repo = LocalRepository::new();

    let expired = repo
        .insert_slot("27", &slot("Monday", "9:00", "9:50", "R101", "A"))
        .await
        .unwrap();
    let mirror = repo.routine_for_slot(expired.id).await.unwrap().unwrap();
    repo.apply_override(
        mirror.id,
        &override_to("Tuesday", "11:00", "11:50", "R202", march(10)),
    )
    .await
    .unwrap();
    let clean = repo
        .insert_slot("27", &slot("Wednesday", "10:00", "10:50", "R101", "A"))
        .await
        .unwrap();

    let purged = repo.purge_expired(march(15)).await.unwrap();
    assert_eq!(purged, 1);
    assert!(repo.routine_for_slot(expired.id).await.unwrap().is_none());
    assert!(repo.routine_for_slot(clean.id).await.unwrap().is_some());
}

// =========================================================
// Reference data
// =========================================================

#[tokio::test]
async fn test_reference_round_trip() {
    let repo = LocalRepository::new();

    repo.store_semester(Semester {
        semester_name: "Fall2024".to_string(),
    })
    .await
    .unwrap();
    repo.store_batch(Batch {
        batch_no: "27".to_string(),
        semester_name: "Fall2024".to_string(),
    })
    .await
    .unwrap();

    let semester = repo.fetch_semester("Fall2024").await.unwrap().unwrap();
    assert_eq!(semester.semester_name, "Fall2024");
    assert!(repo.fetch_semester("Winter1999").await.unwrap().is_none());

    let batch = repo.batch_for_semester("Fall2024").await.unwrap().unwrap();
    assert_eq!(batch.batch_no, "27");
    assert!(repo.batch_for_semester("Spring2025").await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_sections_sorted_by_name() {
    let repo = LocalRepository::new();

    for name in ["B", "A"] {
        repo.store_section(Section {
            section_name: name.to_string(),
        })
        .await
        .unwrap();
    }

    let sections = repo.list_sections().await.unwrap();
    let names: Vec<&str> = sections.iter().map(|s| s.section_name.as_str()).collect();
    assert_eq!(names, vec!["A", "B"]);
}

#[tokio::test]
async fn test_students_filtered_by_semester() {
    let repo = LocalRepository::new();

    for (id, semester) in [("S1", "Fall2024"), ("S2", "Fall2024"), ("S3", "Spring2025")] {
        repo.store_student(Student {
            student_id: id.to_string(),
            email: format!("{}@university.example", id.to_lowercase()),
            semester_name: semester.to_string(),
        })
        .await
        .unwrap();
    }

    let students = repo.students_for_semester("Fall2024").await.unwrap();
    assert_eq!(students.len(), 2);
    assert!(students.iter().all(|s| s.semester_name == "Fall2024"));
}
