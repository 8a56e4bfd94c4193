use std::sync::Arc;

use hexlink_backend::{build_state, AppError, AppState, DbKind};

use super::notifier::RecordingNotifier;

/// Fresh in-memory database with migrations applied.
pub async fn build_test_state() -> Result<AppState, AppError> {
    build_state().with_db(DbKind::SqliteMemory).build().await
}

/// Like [`build_test_state`], with a notifier the test can inspect.
pub async fn build_recording_state() -> Result<(AppState, RecordingNotifier), AppError> {
    let notifier = RecordingNotifier::new();
    let state = build_state()
        .with_db(DbKind::SqliteMemory)
        .with_notifier(Arc::new(notifier.clone()))
        .build()
        .await?;
    Ok((state, notifier))
}
