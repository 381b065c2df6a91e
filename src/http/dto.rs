//! Data Transfer Objects for the HTTP API.
//!
//! Request payload types live with the services that validate them and are
//! re-exported here; this module adds the response wrappers.

use serde::{Deserialize, Serialize};

// Re-export the domain types handlers serialize directly.
pub use crate::api::{ClassSlot, ClassSlotView, FullRoutineEntry};
pub use crate::services::reschedule::{NotificationStatus, RescheduleRequest};
pub use crate::services::slots::SlotSubmission;

/// Confirmation plus the affected slot, for create and update.
#[derive(Debug, Clone, Serialize)]
pub struct SlotResponse {
    /// Confirmation message
    pub message: String,
    /// The created or updated slot
    pub data: ClassSlot,
}

/// Bare confirmation, for delete.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    /// Confirmation message
    pub message: String,
}

/// Response for a persisted reschedule.
#[derive(Debug, Clone, Serialize)]
pub struct RescheduleResponse {
    /// Confirmation message
    pub message: String,
    /// The entry with the override applied
    pub data: FullRoutineEntry,
    /// Announcement outcome; the override stands regardless
    pub notification: NotificationStatus,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Repository connection status
    pub database: String,
}
