//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::NotifierSettings;
use crate::db::repository::FullRepository;
use crate::services::notify::{LogNotifier, Notifier};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for data operations
    pub repository: Arc<dyn FullRepository>,
    /// Delivery backend for reschedule announcements
    pub notifier: Arc<dyn Notifier>,
    /// Sender identity and fallback recipient for announcements
    pub notifier_settings: NotifierSettings,
}

impl AppState {
    /// Create a new application state with the given repository and the
    /// log-backed notifier.
    pub fn new(repository: Arc<dyn FullRepository>) -> Self {
        Self {
            repository,
            notifier: Arc::new(LogNotifier),
            notifier_settings: NotifierSettings::default(),
        }
    }

    /// Replace the notifier backend and its settings.
    pub fn with_notifier(
        mut self,
        notifier: Arc<dyn Notifier>,
        settings: NotifierSettings,
    ) -> Self {
        self.notifier = notifier;
        self.notifier_settings = settings;
        self
    }
}
