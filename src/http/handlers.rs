//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for validation and orchestration.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    ClassSlotView, FullRoutineEntry, HealthResponse, MessageResponse, RescheduleRequest,
    RescheduleResponse, SlotResponse, SlotSubmission,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{RoutineId, SlotId};
use crate::services::{reschedule, slots};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the
/// repository is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Class Slots
// =============================================================================

/// GET /api/class-slots/time-slots
///
/// The fixed ordered set of selectable daily time windows.
pub async fn get_time_slots() -> Json<Vec<&'static str>> {
    Json(slots::time_slots())
}

/// POST /api/class-slots
///
/// Validate a submission and create the slot plus its mirror entry.
pub async fn create_class_slot(
    State(state): State<AppState>,
    Json(submission): Json<SlotSubmission>,
) -> Result<(StatusCode, Json<SlotResponse>), AppError> {
    let created = slots::create_slot(state.repository.as_ref(), &submission).await?;

    Ok((
        StatusCode::CREATED,
        Json(SlotResponse {
            message: "Class slot created successfully".to_string(),
            data: created,
        }),
    ))
}

/// GET /api/class-slots
///
/// List all slots, joined with teacher display names.
pub async fn list_class_slots(State(state): State<AppState>) -> HandlerResult<Vec<ClassSlotView>> {
    let views = slots::list_slots(state.repository.as_ref()).await?;
    Ok(Json(views))
}

/// GET /api/class-slots/{id}
///
/// Fetch a single slot, joined with its teacher's display name.
pub async fn get_class_slot(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<ClassSlotView> {
    let view = slots::get_slot(state.repository.as_ref(), SlotId::new(id)).await?;
    Ok(Json(view))
}

/// GET /api/class-slots/semester/{semester_name}
///
/// List one semester's slots, joined with teacher display names.
pub async fn get_semester_class_slots(
    State(state): State<AppState>,
    Path(semester_name): Path<String>,
) -> HandlerResult<Vec<ClassSlotView>> {
    let views = slots::slots_for_semester(state.repository.as_ref(), &semester_name).await?;
    Ok(Json(views))
}

/// PUT /api/class-slots/{id}
///
/// Re-validate a submission and overwrite an existing slot; the slot's own
/// booking is excluded from the overlap scan.
pub async fn update_class_slot(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(submission): Json<SlotSubmission>,
) -> HandlerResult<SlotResponse> {
    let updated =
        slots::update_slot(state.repository.as_ref(), SlotId::new(id), &submission).await?;

    Ok(Json(SlotResponse {
        message: "Class slot updated successfully".to_string(),
        data: updated,
    }))
}

/// DELETE /api/class-slots/{id}
///
/// Delete a slot together with its mirror entry.
pub async fn delete_class_slot(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<MessageResponse> {
    slots::delete_slot(state.repository.as_ref(), SlotId::new(id)).await?;

    Ok(Json(MessageResponse {
        message: "Class slot deleted successfully".to_string(),
    }))
}

// =============================================================================
// Full Routines
// =============================================================================

/// GET /api/full-routines
///
/// List every routine entry, overrides included.
pub async fn list_full_routines(
    State(state): State<AppState>,
) -> HandlerResult<Vec<FullRoutineEntry>> {
    let entries = reschedule::list_routines(state.repository.as_ref()).await?;
    Ok(Json(entries))
}

/// GET /api/full-routines/{id}
///
/// Fetch a single routine entry.
pub async fn get_full_routine(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<FullRoutineEntry> {
    let entry = reschedule::get_routine(state.repository.as_ref(), RoutineId::new(id)).await?;
    Ok(Json(entry))
}

/// PUT /api/full-routines/{id}
///
/// Apply a temporary override to a routine entry and announce it to the
/// semester's students. The announcement outcome is reported in the
/// response and never fails the request.
pub async fn reschedule_full_routine(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<RescheduleRequest>,
) -> HandlerResult<RescheduleResponse> {
    let outcome = reschedule::reschedule(
        state.repository.as_ref(),
        state.notifier.as_ref(),
        &state.notifier_settings,
        RoutineId::new(id),
        &request,
    )
    .await?;

    Ok(Json(RescheduleResponse {
        message: "Routine rescheduled successfully".to_string(),
        data: outcome.entry,
        notification: outcome.notification,
    }))
}
