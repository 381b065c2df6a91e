//! Background expiration sweep task.
//!
//! A thin periodic loop around [`crate::services::sweep::run_sweep`]: tick,
//! sweep with the current clock, repeat until shutdown. The sweep logic
//! itself lives in the service layer and takes the clock as an argument,
//! so everything interesting is testable without this loop.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;

use crate::config::SweepSettings;
use crate::db::FullRepository;
use crate::services::sweep;

/// Periodic driver for the expiration sweep.
pub struct SweepScheduler {
    repository: Arc<dyn FullRepository>,
    interval: Duration,
}

impl SweepScheduler {
    /// Create a scheduler ticking at the configured interval.
    ///
    /// Production deployments tick daily; tests shorten the interval.
    pub fn new(repository: Arc<dyn FullRepository>, settings: &SweepSettings) -> Self {
        Self {
            repository,
            interval: Duration::from_secs(settings.interval_secs.max(1)),
        }
    }

    /// Main loop. Sweeps every tick until `shutdown` broadcasts `true`.
    ///
    /// The first interval tick fires immediately, so startup runs a
    /// catch-up sweep for overrides that expired while the server was down.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        log::info!(
            "expiration sweep scheduler started (interval {}s)",
            self.interval.as_secs()
        );

        let mut interval = tokio::time::interval(self.interval);
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let Err(e) = sweep::run_sweep(self.repository.as_ref(), Utc::now()).await {
                        log::error!("expiration sweep failed: {}", e);
                    }
                }
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        log::info!("expiration sweep scheduler shutting down");
                        break;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::LocalRepository;

    #[tokio::test(start_paused = true)]
    async fn test_scheduler_stops_on_shutdown() {
        let repo: Arc<dyn FullRepository> = Arc::new(LocalRepository::new());
        let scheduler = SweepScheduler::new(repo, &SweepSettings { interval_secs: 60 });

        let (tx, rx) = watch::channel(false);
        let handle = tokio::spawn(scheduler.run(rx));

        tx.send(true).unwrap();
        handle.await.unwrap();
    }
}
