//! DTOs for sessions_sea adapter.

use sea_orm::prelude::Json;

/// DTO for inserting the session of a room that just started.
#[derive(Debug, Clone)]
pub struct SessionCreate {
    pub room_id: String,
    pub deck: Json,
    pub current_tile_p1: Option<String>,
    pub current_tile_p2: Option<String>,
}

/// Full replacement of the mutable session columns with optimistic locking.
///
/// `expected_lock_version` must match the stored version for the write to land.
#[derive(Debug, Clone)]
pub struct SessionUpdate {
    pub room_id: String,
    pub expected_lock_version: i32,
    pub current_turn: i16,
    pub deck: Json,
    pub current_tile_p1: Option<String>,
    pub current_tile_p2: Option<String>,
    pub player1_score: i32,
    pub player2_score: i32,
    pub winner: Option<i16>,
}
