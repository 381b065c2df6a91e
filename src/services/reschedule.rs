//! Reschedule workflow over full routine entries.
//!
//! A reschedule temporarily moves a routine entry to a new day/time/room
//! until an expiration instant, after which the sweep rolls it back. The
//! requested window is checked against existing room bookings before the
//! override is applied; rooms are a global resource, so the scan runs
//! across semesters. The announcement to affected students happens after
//! the override persists and its outcome never unwinds the write.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{ClockTime, FullRoutineEntry, RoutineId, RoutineOverride};
use crate::config::NotifierSettings;
use crate::db::FullRepository;
use crate::services::error::{ServiceError, ServiceResult};
use crate::services::notify::{Notification, Notifier};

/// Raw reschedule payload: new day/time/room plus the expiration instant.
///
/// Fields arrive as strings; absent JSON keys become empty strings and are
/// rejected in one presence check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RescheduleRequest {
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    pub room_no: String,
    pub expiration_date: String,
}

/// What happened to the announcement for a persisted reschedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    /// Delivered to the resolved recipients
    Sent,
    /// The notifier backend reported a delivery failure
    Failed,
    /// No recipients could be resolved, not even the fallback address
    Skipped,
}

/// Result of a reschedule: the overridden entry plus the announcement
/// outcome.
#[derive(Debug, Clone)]
pub struct RescheduleOutcome {
    pub entry: FullRoutineEntry,
    pub notification: NotificationStatus,
}

// ==================== Reads ====================

/// Fetch one routine entry by id.
pub async fn get_routine(
    repo: &dyn FullRepository,
    id: RoutineId,
) -> ServiceResult<FullRoutineEntry> {
    repo.fetch_routine(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Routine not found"))
}

/// List every routine entry.
pub async fn list_routines(repo: &dyn FullRepository) -> ServiceResult<Vec<FullRoutineEntry>> {
    Ok(repo.list_routines().await?)
}

// ==================== Reschedule ====================

fn parse_expiration(raw: &str) -> ServiceResult<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Utc));
    }
    // Calendar inputs submit a bare date; the override expires at midnight
    // UTC of that day.
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&midnight));
        }
    }
    Err(ServiceError::validation("Invalid expiration date"))
}

fn parse_request(request: &RescheduleRequest) -> ServiceResult<RoutineOverride> {
    let required = [
        &request.day,
        &request.start_time,
        &request.end_time,
        &request.room_no,
        &request.expiration_date,
    ];
    if required.iter().any(|field| field.trim().is_empty()) {
        return Err(ServiceError::validation("Missing required fields"));
    }

    let start_time: ClockTime = request
        .start_time
        .parse()
        .map_err(|_| ServiceError::validation("Invalid time format"))?;
    let end_time: ClockTime = request
        .end_time
        .parse()
        .map_err(|_| ServiceError::validation("Invalid time format"))?;
    if end_time <= start_time {
        return Err(ServiceError::validation("End time must be after start time"));
    }

    Ok(RoutineOverride {
        day: request.day.clone(),
        start_time,
        end_time,
        room_no: request.room_no.clone(),
        expiration_date: parse_expiration(&request.expiration_date)?,
    })
}

async fn build_notification(
    repo: &dyn FullRepository,
    settings: &NotifierSettings,
    entry: &FullRoutineEntry,
) -> ServiceResult<Option<Notification>> {
    let students = repo.students_for_semester(&entry.semester_name).await?;
    let mut recipients: Vec<String> = students.into_iter().map(|s| s.email).collect();
    if recipients.is_empty() {
        log::warn!("No students found for semester {}", entry.semester_name);
        if settings.fallback_address.trim().is_empty() {
            return Ok(None);
        }
        recipients.push(settings.fallback_address.clone());
    }

    let details = serde_json::to_string_pretty(entry).unwrap_or_default();
    let valid_until = entry
        .expiration_date
        .map(|instant| instant.to_string())
        .unwrap_or_default();

    Ok(Some(Notification {
        sender: settings.sender_name.clone(),
        recipients,
        subject: "Routine Rescheduled".to_string(),
        body: format!(
            "Your routine has been rescheduled. New details:\n\n{}\n\nThis new schedule is valid until {}",
            details, valid_until
        ),
    }))
}

/// Apply a temporary override to a routine entry and announce it.
///
/// The requested window must be free in the requested room on the requested
/// day, across semesters; otherwise the entry is left unchanged. The
/// announcement outcome is reported alongside the entry and never fails
/// the request.
pub async fn reschedule(
    repo: &dyn FullRepository,
    notifier: &dyn Notifier,
    settings: &NotifierSettings,
    id: RoutineId,
    request: &RescheduleRequest,
) -> ServiceResult<RescheduleOutcome> {
    let change = parse_request(request)?;

    let window = change.time_range();
    let booked = repo
        .slots_for_day_room(&change.day, &change.room_no)
        .await?;
    if booked.iter().any(|slot| slot.time_range().overlaps(&window)) {
        return Err(ServiceError::validation(
            "Requested time slots are not available. Please choose a different time slot.",
        ));
    }

    let updated = repo.apply_override(id, &change).await?;
    log::info!(
        "rescheduled routine {} to {} {}-{} in {} until {}",
        updated.id,
        change.day,
        change.start_time,
        change.end_time,
        change.room_no,
        change.expiration_date
    );

    let notification = match build_notification(repo, settings, &updated).await? {
        Some(message) => match notifier.send(&message).await {
            Ok(()) => NotificationStatus::Sent,
            Err(err) => {
                log::error!("reschedule announcement for routine {} failed: {}", id, err);
                NotificationStatus::Failed
            }
        },
        None => NotificationStatus::Skipped,
    };

    Ok(RescheduleOutcome {
        entry: updated,
        notification,
    })
}
