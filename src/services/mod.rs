//! Service layer for business logic and orchestration.
//!
//! This module sits between the HTTP handlers and the repository traits.
//! Services run the validation ladder, classify overlaps, orchestrate the
//! reschedule workflow, and drive the expiration sweep.

pub mod conflict;

pub mod error;

pub mod notify;

pub mod reschedule;

pub mod slots;

pub mod sweep;

pub use conflict::{conflict_messages, find_conflicts, ConflictKind};
pub use error::{ServiceError, ServiceResult};
pub use notify::{LogNotifier, Notification, Notifier, NotifyError};
pub use reschedule::{NotificationStatus, RescheduleOutcome, RescheduleRequest};
pub use slots::{ClassSlotView, SlotSubmission};
pub use sweep::{run_sweep, SweepOutcome};
