//! Maintenance operations behind the debug routes.

use sea_orm::DatabaseTransaction;
use tracing::warn;

use crate::entities::rooms::RoomStatus;
use crate::error::AppError;
use crate::repos::{rooms, sessions, users};

/// A room with its players resolved to usernames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomListing {
    pub room_id: String,
    pub status: RoomStatus,
    pub player1: String,
    /// `None` while the second seat is open
    pub player2: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearSummary {
    pub rooms: u64,
    pub sessions: u64,
}

pub async fn list_rooms(txn: &DatabaseTransaction) -> Result<Vec<RoomListing>, AppError> {
    let rooms = rooms::list_all(txn).await?;

    let mut ids: Vec<i64> = rooms
        .iter()
        .flat_map(|r| [r.player1_id, r.player2_id])
        .collect();
    ids.sort_unstable();
    ids.dedup();
    let names = users::usernames_by_id(txn, &ids).await?;

    let name_of = |id: i64| {
        names
            .get(&id)
            .cloned()
            .unwrap_or_else(|| format!("#{id}"))
    };

    Ok(rooms
        .into_iter()
        .map(|room| RoomListing {
            player1: name_of(room.player1_id),
            player2: (room.player2_id != room.player1_id).then(|| name_of(room.player2_id)),
            room_id: room.id,
            status: room.status,
        })
        .collect())
}

/// Delete every placement, session and room.
pub async fn clear_all(txn: &DatabaseTransaction) -> Result<ClearSummary, AppError> {
    let sessions = sessions::delete_all(txn).await?;
    let rooms = rooms::delete_all(txn).await?;
    warn!(rooms, sessions, "all rooms cleared");
    Ok(ClearSummary { rooms, sessions })
}
