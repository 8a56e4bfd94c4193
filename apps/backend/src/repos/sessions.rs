//! Game session repository: assembles a [`SessionState`] from the session row
//! and the room's placements, and writes transitions back.

use std::collections::VecDeque;

use sea_orm::prelude::Json;
use sea_orm::ConnectionTrait;

use crate::adapters::placements_sea as placements_adapter;
use crate::adapters::sessions_sea as sessions_adapter;
use crate::domain::session::{Placement, SessionState};
use crate::entities::{game_sessions, tile_placements};
use crate::errors::domain::{DomainError, InfraErrorKind};

/// A session as stored, with the lock version it was read at.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSession {
    pub room_id: String,
    pub state: SessionState,
    pub lock_version: i32,
}

fn corrupt(detail: impl Into<String>) -> DomainError {
    DomainError::infra(InfraErrorKind::DataCorruption, detail)
}

fn player_number(raw: i16, allow_none: bool) -> Result<u8, DomainError> {
    match raw {
        0 if allow_none => Ok(0),
        1 | 2 => Ok(raw as u8),
        other => Err(corrupt(format!("invalid player number {other}"))),
    }
}

fn encode_deck(deck: &VecDeque<String>) -> Result<Json, DomainError> {
    serde_json::to_value(deck).map_err(|e| corrupt(format!("deck encode: {e}")))
}

fn decode_deck(deck: Json) -> Result<VecDeque<String>, DomainError> {
    serde_json::from_value(deck).map_err(|e| corrupt(format!("deck decode: {e}")))
}

fn placement_from_model(model: tile_placements::Model) -> Result<Placement, DomainError> {
    Ok(Placement {
        q: model.q,
        r: model.r,
        tile_id: model.tile_id,
        player: player_number(model.player, true)?,
        rotation: model.rotation,
    })
}

fn stored_from_models(
    session: game_sessions::Model,
    placements: Vec<tile_placements::Model>,
) -> Result<StoredSession, DomainError> {
    let placed_tiles = placements
        .into_iter()
        .map(placement_from_model)
        .collect::<Result<Vec<_>, _>>()?;

    let state = SessionState {
        current_turn: player_number(session.current_turn, false)?,
        placed_tiles,
        deck: decode_deck(session.deck)?,
        current_tile_p1: session.current_tile_p1,
        current_tile_p2: session.current_tile_p2,
        player1_score: session.player1_score,
        player2_score: session.player2_score,
        winner: session
            .winner
            .map(|w| player_number(w, true))
            .transpose()?,
    };

    Ok(StoredSession {
        room_id: session.room_id,
        state,
        lock_version: session.lock_version,
    })
}

async fn insert_placement<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
    seq: usize,
    placement: &Placement,
) -> Result<(), DomainError> {
    let seq = i32::try_from(seq).map_err(|_| corrupt("placement sequence overflow"))?;
    placements_adapter::create_placement(
        conn,
        placements_adapter::PlacementCreate {
            room_id: room_id.to_string(),
            seq,
            q: placement.q,
            r: placement.r,
            tile_id: placement.tile_id.clone(),
            player: i16::from(placement.player),
            rotation: placement.rotation,
        },
    )
    .await?;
    Ok(())
}

pub async fn find_by_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
) -> Result<Option<StoredSession>, DomainError> {
    let Some(session) = sessions_adapter::find_by_room(conn, room_id).await? else {
        return Ok(None);
    };
    let placements = placements_adapter::find_all_by_room(conn, room_id).await?;
    stored_from_models(session, placements).map(Some)
}

/// Persist a freshly initialized session together with its seeded board.
pub async fn create_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
    state: &SessionState,
) -> Result<StoredSession, DomainError> {
    let session = sessions_adapter::create_session(
        conn,
        sessions_adapter::SessionCreate {
            room_id: room_id.to_string(),
            deck: encode_deck(&state.deck)?,
            current_tile_p1: state.current_tile_p1.clone(),
            current_tile_p2: state.current_tile_p2.clone(),
        },
    )
    .await?;

    for (seq, placement) in state.placed_tiles.iter().enumerate() {
        insert_placement(conn, room_id, seq, placement).await?;
    }

    Ok(StoredSession {
        room_id: session.room_id,
        state: state.clone(),
        lock_version: session.lock_version,
    })
}

/// Write back a session after one accepted placement.
///
/// The session row is compare-and-swapped on `stored.lock_version`; the new
/// placement takes the next sequence slot.
pub async fn save_placement<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    stored: &StoredSession,
    next: &SessionState,
) -> Result<StoredSession, DomainError> {
    let updated = sessions_adapter::update_session(
        conn,
        sessions_adapter::SessionUpdate {
            room_id: stored.room_id.clone(),
            expected_lock_version: stored.lock_version,
            current_turn: i16::from(next.current_turn),
            deck: encode_deck(&next.deck)?,
            current_tile_p1: next.current_tile_p1.clone(),
            current_tile_p2: next.current_tile_p2.clone(),
            player1_score: next.player1_score,
            player2_score: next.player2_score,
            winner: next.winner.map(i16::from),
        },
    )
    .await?;

    let seq = stored.state.placed_tiles.len();
    if let Some(placement) = next.placed_tiles.get(seq) {
        insert_placement(conn, &stored.room_id, seq, placement).await?;
    }

    Ok(StoredSession {
        room_id: updated.room_id,
        state: next.clone(),
        lock_version: updated.lock_version,
    })
}

/// Drop every session and placement. Returns the number of sessions removed.
pub async fn delete_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, DomainError> {
    placements_adapter::delete_all(conn).await?;
    Ok(sessions_adapter::delete_all(conn).await?)
}
