//! Session state machine: initialization, turn ownership and placements.
//!
//! Pure logic over an in-memory snapshot. Services load the snapshot, apply a
//! transition here and persist the result with a compare-and-swap write.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::domain::deck::STARTER_TILE;
use crate::errors::domain::{ConflictKind, DomainError, ForbiddenKind};

/// Player number recorded on the starter tile.
pub const NO_PLAYER: u8 = 0;
/// `winner` value for a drawn game.
pub const TIE: u8 = 0;

/// One tile on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub q: i32,
    pub r: i32,
    pub tile_id: String,
    /// 1 or 2; [`NO_PLAYER`] for the starter tile
    pub player: u8,
    pub rotation: i32,
}

impl Placement {
    pub fn starter() -> Self {
        Self {
            q: 0,
            r: 0,
            tile_id: STARTER_TILE.to_string(),
            player: NO_PLAYER,
            rotation: 0,
        }
    }
}

/// A placement as submitted by the turn holder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub q: i32,
    pub r: i32,
    pub tile_id: String,
    pub rotation: i32,
}

/// The two participants of a playing room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seats {
    pub player1_id: i64,
    pub player2_id: i64,
}

impl Seats {
    /// Player id that must act when `turn` is up.
    pub fn holder_of(&self, turn: u8) -> i64 {
        if turn == 1 {
            self.player1_id
        } else {
            self.player2_id
        }
    }
}

/// Result of an accepted placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Player who placed the tile
    pub placed_by: u8,
    pub current_turn: u8,
    pub game_over: bool,
    pub winner: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub current_turn: u8,
    pub placed_tiles: Vec<Placement>,
    /// Undrawn tiles; drawn from the front
    pub deck: VecDeque<String>,
    pub current_tile_p1: Option<String>,
    pub current_tile_p2: Option<String>,
    pub player1_score: i32,
    pub player2_score: i32,
    pub winner: Option<u8>,
}

impl SessionState {
    /// Seed a session: starter tile on the board, one tile drawn for each player.
    pub fn initialize(deck: impl Into<VecDeque<String>>) -> Self {
        let mut deck = deck.into();
        let current_tile_p1 = deck.pop_front();
        let current_tile_p2 = deck.pop_front();
        Self {
            current_turn: 1,
            placed_tiles: vec![Placement::starter()],
            deck,
            current_tile_p1,
            current_tile_p2,
            player1_score: 0,
            player2_score: 0,
            winner: None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.winner.is_some()
    }

    pub fn tiles_remaining(&self) -> usize {
        self.deck.len()
    }

    /// Reject placements on a finished session, then check turn ownership.
    pub fn authorize(&self, seats: &Seats, player_id: i64) -> Result<(), DomainError> {
        if self.is_finished() {
            return Err(DomainError::conflict(
                ConflictKind::SessionFinished,
                "Game is already over",
            ));
        }
        if seats.holder_of(self.current_turn) != player_id {
            return Err(DomainError::forbidden(
                ForbiddenKind::NotYourTurn,
                "Not your turn",
            ));
        }
        Ok(())
    }

    /// Apply a placement by the current turn holder.
    ///
    /// Appends the tile, scores one point, draws a replacement tile for the
    /// mover and flips the turn. Emptying the deck decides the winner; the
    /// turn still flips on that move.
    pub fn apply(&mut self, mv: Move) -> Result<TurnOutcome, DomainError> {
        if self.is_finished() {
            return Err(DomainError::conflict(
                ConflictKind::SessionFinished,
                "Game is already over",
            ));
        }

        let mover = self.current_turn;
        self.placed_tiles.push(Placement {
            q: mv.q,
            r: mv.r,
            tile_id: mv.tile_id,
            player: mover,
            rotation: mv.rotation,
        });

        let drawn = self.deck.pop_front();
        if mover == 1 {
            self.player1_score += 1;
            self.current_tile_p1 = drawn;
        } else {
            self.player2_score += 1;
            self.current_tile_p2 = drawn;
        }

        if self.deck.is_empty() {
            self.winner = Some(decide_winner(self.player1_score, self.player2_score));
        }

        self.current_turn = other_player(mover);

        Ok(TurnOutcome {
            placed_by: mover,
            current_turn: self.current_turn,
            game_over: self.is_finished(),
            winner: self.winner,
        })
    }
}

pub fn other_player(turn: u8) -> u8 {
    if turn == 1 {
        2
    } else {
        1
    }
}

/// Higher score wins; equal scores are a [`TIE`].
pub fn decide_winner(player1_score: i32, player2_score: i32) -> u8 {
    match player1_score.cmp(&player2_score) {
        std::cmp::Ordering::Greater => 1,
        std::cmp::Ordering::Less => 2,
        std::cmp::Ordering::Equal => TIE,
    }
}
