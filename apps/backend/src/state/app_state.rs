use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::services::notify::{LogNotifier, Notifier};

/// Application state containing shared resources.
///
/// Holds the injected collaborators every request needs; nothing here is a
/// process-wide singleton.
#[derive(Clone)]
pub struct AppState {
    /// Database connection (optional for test scenarios)
    db: Option<DatabaseConnection>,
    /// Outbound notification channel (fire-and-forget)
    notifier: Arc<dyn Notifier>,
}

impl AppState {
    /// Create a new AppState with the given database connection and notifier
    pub fn new(db: DatabaseConnection, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            db: Some(db),
            notifier,
        }
    }

    /// Create a new AppState without a database connection
    pub fn new_without_db(notifier: Arc<dyn Notifier>) -> Self {
        Self { db: None, notifier }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }

    pub fn notifier(&self) -> Arc<dyn Notifier> {
        Arc::clone(&self.notifier)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("db", &self.db.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new_without_db(Arc::new(LogNotifier))
    }
}
