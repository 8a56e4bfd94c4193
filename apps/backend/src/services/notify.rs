//! Outbound notifications (welcome, match found, game over).
//!
//! Delivery is best-effort: notifications are dispatched after the request's
//! transaction has committed and never influence the HTTP response.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::logging::pii::Redacted;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Welcome {
        username: String,
        email: String,
    },
    MatchFound {
        room_id: String,
        player_ids: [i64; 2],
    },
    GameOver {
        room_id: String,
        winner: u8,
    },
}

impl Notification {
    pub fn kind(&self) -> &'static str {
        match self {
            Notification::Welcome { .. } => "welcome",
            Notification::MatchFound { .. } => "match_found",
            Notification::GameOver { .. } => "game_over",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("notification delivery failed: {0}")]
pub struct NotifyError(pub String);

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: Notification) -> Result<(), NotifyError>;
}

/// Default notifier: writes each notification as a structured log event.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, notification: Notification) -> Result<(), NotifyError> {
        match &notification {
            Notification::Welcome { username, email } => {
                info!(kind = notification.kind(), username = %username, email = %Redacted(email), "notification");
            }
            Notification::MatchFound {
                room_id,
                player_ids,
            } => {
                info!(
                    kind = notification.kind(),
                    room_id = %room_id,
                    player1_id = player_ids[0],
                    player2_id = player_ids[1],
                    "notification"
                );
            }
            Notification::GameOver { room_id, winner } => {
                info!(kind = notification.kind(), room_id = %room_id, winner = winner, "notification");
            }
        }
        Ok(())
    }
}

/// Fire-and-forget delivery on a background task.
///
/// Call only after the owning transaction has committed.
pub fn dispatch(notifier: Arc<dyn Notifier>, notification: Notification) {
    tokio::spawn(async move {
        let kind = notification.kind();
        if let Err(e) = notifier.notify(notification).await {
            warn!(kind, error = %e, "notification dropped");
        }
    });
}
