//! Tile placement and session snapshots.

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use tracing::{debug, info};

use crate::domain::room_code::normalize_room_id;
use crate::domain::Move;
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use crate::repos::rooms::{self, Room};
use crate::repos::sessions::{self, StoredSession};
use crate::services::notify::Notification;

/// Placement request as received; every field but `rotation` is required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceTileInput {
    pub room_id: Option<String>,
    pub player_id: Option<i64>,
    pub q: Option<i32>,
    pub r: Option<i32>,
    pub tile_id: Option<String>,
    pub rotation: Option<i32>,
}

impl PlaceTileInput {
    fn validate(self) -> Result<(String, i64, Move), DomainError> {
        let missing =
            || DomainError::validation(ValidationKind::MissingParameters, "Missing parameters");

        let room_id = self.room_id.filter(|s| !s.trim().is_empty()).ok_or_else(missing)?;
        let player_id = self.player_id.ok_or_else(missing)?;
        let (q, r) = self.q.zip(self.r).ok_or_else(missing)?;
        let tile_id = self.tile_id.filter(|s| !s.trim().is_empty()).ok_or_else(missing)?;

        let room_id = normalize_room_id(&room_id).ok_or_else(room_not_found)?;
        Ok((
            room_id,
            player_id,
            Move {
                q,
                r,
                tile_id,
                rotation: self.rotation.unwrap_or(0),
            },
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceTileOutcome {
    pub room_id: String,
    pub current_turn: u8,
    pub game_over: bool,
    pub winner: Option<u8>,
}

impl PlaceTileOutcome {
    /// Notification to send once a finishing move is committed.
    pub fn notification(&self) -> Option<Notification> {
        match (self.game_over, self.winner) {
            (true, Some(winner)) => Some(Notification::GameOver {
                room_id: self.room_id.clone(),
                winner,
            }),
            _ => None,
        }
    }
}

/// What a polling client sees for a room.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionSnapshot {
    /// Room exists but nobody has joined yet
    Waiting(Room),
    Active(Room, StoredSession),
}

/// Session domain service.
pub struct SessionService;

impl SessionService {
    pub fn new() -> Self {
        Self
    }

    /// Apply one placement by the player holding the turn.
    ///
    /// Checks run in order: missing fields, unknown room or session, finished
    /// session, turn ownership. Nothing is written unless all pass. The session
    /// row is compare-and-swapped on its lock version, so of two concurrent
    /// placements on one room at most one commits.
    pub async fn place_tile(
        &self,
        txn: &DatabaseTransaction,
        input: PlaceTileInput,
    ) -> Result<PlaceTileOutcome, AppError> {
        let (room_id, player_id, mv) = input.validate()?;

        let room = rooms::find_by_id(txn, &room_id)
            .await?
            .ok_or_else(room_not_found)?;
        let stored = sessions::find_by_room(txn, &room_id)
            .await?
            .ok_or_else(game_not_found)?;

        stored.state.authorize(&room.seats(), player_id)?;

        debug!(room_id = %room_id, player_id, q = mv.q, r = mv.r, tile_id = %mv.tile_id, "Placing tile");

        let mut next = stored.state.clone();
        let outcome = next.apply(mv)?;
        sessions::save_placement(txn, &stored, &next).await?;

        info!(
            room_id = %room_id,
            player = outcome.placed_by,
            current_turn = outcome.current_turn,
            tiles_remaining = next.tiles_remaining(),
            "tile placed"
        );

        if outcome.game_over {
            rooms::finish_room(txn, &room).await?;
            info!(
                room_id = %room_id,
                winner = outcome.winner,
                player1_score = next.player1_score,
                player2_score = next.player2_score,
                "session finished"
            );
        }

        Ok(PlaceTileOutcome {
            room_id,
            current_turn: outcome.current_turn,
            game_over: outcome.game_over,
            winner: outcome.winner,
        })
    }

    /// Read-only snapshot of a room and its session, if any.
    pub async fn get_state<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        room_id: &str,
    ) -> Result<SessionSnapshot, AppError> {
        let room = rooms::require_room(conn, room_id).await?;
        match sessions::find_by_room(conn, &room.id).await? {
            Some(stored) => Ok(SessionSnapshot::Active(room, stored)),
            None => Ok(SessionSnapshot::Waiting(room)),
        }
    }
}

impl Default for SessionService {
    fn default() -> Self {
        Self::new()
    }
}

fn room_not_found() -> DomainError {
    DomainError::not_found(NotFoundKind::Room, "Game not found")
}

fn game_not_found() -> DomainError {
    DomainError::not_found(NotFoundKind::Session, "Game not found")
}
