//! Expiration sweep over rescheduled routine entries.
//!
//! The sweep takes the clock as an argument, so tests drive it with fixed
//! instants and the scheduler drives it with `Utc::now()`.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::db::FullRepository;
use crate::services::error::ServiceResult;

/// Counts from one sweep pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SweepOutcome {
    /// Overrides rolled back to their captured snapshot
    pub reverted: usize,
    /// Expired entries without a snapshot, removed by the cleanup pass
    pub purged: usize,
}

impl SweepOutcome {
    /// True when the pass found nothing to do.
    pub fn is_empty(&self) -> bool {
        self.reverted == 0 && self.purged == 0
    }
}

/// Revert every override whose expiration is at or before `now`.
///
/// Entries carrying a snapshot are rolled back in place: day, time, and
/// room are restored and the expiration and snapshot are cleared. A
/// secondary cleanup pass then deletes entries still matching the expiry
/// filter, which catches entries that expired without a snapshot to
/// restore. Reverted entries no longer match the filter, so a second pass
/// with the same clock finds nothing.
pub async fn run_sweep(
    repo: &dyn FullRepository,
    now: DateTime<Utc>,
) -> ServiceResult<SweepOutcome> {
    let expired = repo.expired_routines(now).await?;

    let mut reverted = 0;
    for entry in &expired {
        if entry.original.is_some() {
            repo.revert_routine(entry.id).await?;
            reverted += 1;
        }
    }

    let purged = repo.purge_expired(now).await?;

    let outcome = SweepOutcome { reverted, purged };
    if outcome.is_empty() {
        log::debug!("expiration sweep at {}: nothing expired", now);
    } else {
        log::info!(
            "expiration sweep at {}: {} reverted, {} purged",
            now,
            outcome.reverted,
            outcome.purged
        );
    }
    Ok(outcome)
}
