//! DTOs for rooms_sea adapter.

/// DTO for creating a waiting room.
///
/// The creator fills both seats until an opponent claims the room.
#[derive(Debug, Clone)]
pub struct RoomCreate {
    pub id: String,
    pub player_id: i64,
}

impl RoomCreate {
    pub fn new(id: impl Into<String>, player_id: i64) -> Self {
        Self {
            id: id.into(),
            player_id,
        }
    }
}

/// DTO for claiming the open seat of a waiting room.
#[derive(Debug, Clone)]
pub struct RoomClaim {
    pub id: String,
    pub player_id: i64,
    pub expected_lock_version: i32,
}
