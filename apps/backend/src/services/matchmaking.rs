//! Quick match: join the oldest open room or open a new one.

use sea_orm::{DatabaseTransaction, TransactionTrait};
use tracing::{debug, info};

use crate::domain::room_code::generate_room_id;
use crate::domain::{create_deck, SessionState};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, ValidationKind};
use crate::repos::rooms::{self, Room};
use crate::repos::{sessions, users};
use crate::services::notify::Notification;

/// Fresh room ids tried before giving up.
pub const ROOM_ID_ATTEMPTS: usize = 5;
/// Waiting rooms considered per call; losing every claim falls through to creating a room.
const CLAIM_CANDIDATES: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    pub room_id: String,
    /// 1 when the caller opened the room, 2 when they joined one
    pub player_number: u8,
    /// Room creator, present when the caller joined
    pub opponent_id: Option<i64>,
}

impl MatchOutcome {
    /// Notification to send once the match is committed.
    pub fn notification(&self, player_id: i64) -> Option<Notification> {
        self.opponent_id.map(|opponent| Notification::MatchFound {
            room_id: self.room_id.clone(),
            player_ids: [opponent, player_id],
        })
    }
}

/// Matchmaking domain service.
pub struct MatchmakingService;

impl MatchmakingService {
    pub fn new() -> Self {
        Self
    }

    /// Pair `player_id` with a waiting room, or open a waiting room for them.
    ///
    /// Joining is a compare-and-swap on the room's status and lock version, so
    /// two callers racing for one room cannot both take seat 2. The session is
    /// created in the same transaction as the claim.
    pub async fn quick_match(
        &self,
        txn: &DatabaseTransaction,
        player_id: Option<i64>,
    ) -> Result<MatchOutcome, AppError> {
        let player_id = player_id.ok_or_else(|| {
            DomainError::validation(ValidationKind::MissingPlayerId, "player_id required")
        })?;
        users::require_user(txn, player_id).await?;

        let candidates = rooms::waiting_rooms_for(txn, player_id, CLAIM_CANDIDATES).await?;
        self.claim_or_open(txn, player_id, candidates).await
    }

    /// Claim the first of `candidates` that is still open, else open a room.
    ///
    /// `candidates` is a snapshot and may be stale by the time each claim
    /// runs; a lost claim moves on to the next candidate.
    pub async fn claim_or_open(
        &self,
        txn: &DatabaseTransaction,
        player_id: i64,
        candidates: Vec<Room>,
    ) -> Result<MatchOutcome, AppError> {
        for candidate in candidates {
            let Some(room) = rooms::claim_seat(txn, &candidate, player_id).await? else {
                debug!(room_id = %candidate.id, player_id, "Waiting room taken by another player");
                continue;
            };

            let state = SessionState::initialize(create_deck());
            sessions::create_session(txn, &room.id, &state).await?;

            info!(
                room_id = %room.id,
                player1_id = room.player1_id,
                player2_id = room.player2_id,
                "room claimed"
            );
            return Ok(MatchOutcome {
                room_id: room.id,
                player_number: 2,
                opponent_id: Some(room.player1_id),
            });
        }

        let room = create_waiting_room(txn, player_id).await?;
        info!(room_id = %room.id, player1_id = player_id, "room created");
        Ok(MatchOutcome {
            room_id: room.id,
            player_number: 1,
            opponent_id: None,
        })
    }
}

impl Default for MatchmakingService {
    fn default() -> Self {
        Self::new()
    }
}

/// Insert a waiting room under a fresh random id.
///
/// Each attempt runs in a savepoint so a collision does not poison the outer
/// transaction.
async fn create_waiting_room(
    txn: &DatabaseTransaction,
    player_id: i64,
) -> Result<Room, AppError> {
    for attempt in 1..=ROOM_ID_ATTEMPTS {
        let room_id = generate_room_id();
        let savepoint = txn.begin().await?;

        match rooms::create_room(&savepoint, &room_id, player_id).await {
            Ok(room) => {
                savepoint.commit().await?;
                return Ok(room);
            }
            Err(DomainError::Conflict(ConflictKind::RoomIdCollision, _)) => {
                savepoint.rollback().await?;
                debug!(room_id = %room_id, attempt, "Room id collision, retrying");
            }
            Err(e) => {
                savepoint.rollback().await?;
                return Err(e.into());
            }
        }
    }

    Err(DomainError::infra(
        InfraErrorKind::RoomIdsExhausted,
        format!("No free room id after {ROOM_ID_ATTEMPTS} attempts"),
    )
    .into())
}
