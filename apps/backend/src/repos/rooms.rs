//! Room repository functions for domain layer.

use sea_orm::ConnectionTrait;

use crate::adapters::rooms_sea as rooms_adapter;
use crate::domain::session::Seats;
use crate::entities::rooms;
use crate::entities::rooms::RoomStatus;
use crate::errors::domain::{DomainError, NotFoundKind};

/// Room domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: String,
    pub player1_id: i64,
    pub player2_id: i64,
    pub status: RoomStatus,
    pub lock_version: i32,
    pub created_at: time::OffsetDateTime,
}

impl Room {
    /// Seat 2 still holds the creator's id.
    pub fn has_open_seat(&self) -> bool {
        self.status == RoomStatus::Waiting && self.player1_id == self.player2_id
    }

    pub fn seats(&self) -> Seats {
        Seats {
            player1_id: self.player1_id,
            player2_id: self.player2_id,
        }
    }
}

impl From<rooms::Model> for Room {
    fn from(model: rooms::Model) -> Self {
        Self {
            id: model.id,
            player1_id: model.player1_id,
            player2_id: model.player2_id,
            status: model.status,
            lock_version: model.lock_version,
            created_at: model.created_at,
        }
    }
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
) -> Result<Option<Room>, DomainError> {
    let room = rooms_adapter::find_by_id(conn, room_id).await?;
    Ok(room.map(Room::from))
}

/// Find room by id or return `NotFound`.
pub async fn require_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
) -> Result<Room, DomainError> {
    find_by_id(conn, room_id)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Room, "Room not found"))
}

/// Waiting rooms `player_id` could join, oldest first.
pub async fn waiting_rooms_for<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    limit: u64,
) -> Result<Vec<Room>, DomainError> {
    let rooms = rooms_adapter::list_waiting_for(conn, player_id, limit).await?;
    Ok(rooms.into_iter().map(Room::from).collect())
}

pub async fn create_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
    player_id: i64,
) -> Result<Room, DomainError> {
    let dto = rooms_adapter::RoomCreate::new(room_id, player_id);
    let room = rooms_adapter::create_room(conn, dto).await?;
    Ok(Room::from(room))
}

/// Claim the open seat of `room`. `Ok(None)` means another request got there first.
pub async fn claim_seat<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room: &Room,
    player_id: i64,
) -> Result<Option<Room>, DomainError> {
    let dto = rooms_adapter::RoomClaim {
        id: room.id.clone(),
        player_id,
        expected_lock_version: room.lock_version,
    };
    let claimed = rooms_adapter::claim_waiting_room(conn, dto).await?;
    Ok(claimed.map(Room::from))
}

pub async fn finish_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room: &Room,
) -> Result<Room, DomainError> {
    let finished = rooms_adapter::finish_room(conn, &room.id, room.lock_version).await?;
    Ok(Room::from(finished))
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<Vec<Room>, DomainError> {
    let rooms = rooms_adapter::list_all(conn).await?;
    Ok(rooms.into_iter().map(Room::from).collect())
}

pub async fn delete_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, DomainError> {
    Ok(rooms_adapter::delete_all(conn).await?)
}
