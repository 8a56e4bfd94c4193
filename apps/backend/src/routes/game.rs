//! Session routes: polling snapshots and submitting placements.

use actix_web::web;
use serde::{Deserialize, Serialize};

use crate::db::txn::with_txn;
use crate::domain::Placement;
use crate::entities::rooms::RoomStatus;
use crate::error::AppError;
use crate::extractors::{RoomId, ValidatedJson};
use crate::services::notify::dispatch;
use crate::services::sessions::{PlaceTileInput, SessionService, SessionSnapshot};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum StateResponse {
    Waiting {
        room_id: String,
        status: RoomStatus,
        message: &'static str,
        waiting_for_opponent: bool,
    },
    Active {
        room_id: String,
        status: RoomStatus,
        current_turn: u8,
        placed_tiles: Vec<Placement>,
        current_tile_p1: Option<String>,
        current_tile_p2: Option<String>,
        player1_score: i32,
        player2_score: i32,
        winner: Option<u8>,
        tiles_remaining: usize,
    },
}

impl From<SessionSnapshot> for StateResponse {
    fn from(snapshot: SessionSnapshot) -> Self {
        match snapshot {
            SessionSnapshot::Waiting(room) => StateResponse::Waiting {
                room_id: room.id,
                status: room.status,
                message: "Waiting for player 2",
                waiting_for_opponent: true,
            },
            SessionSnapshot::Active(room, stored) => {
                let tiles_remaining = stored.state.tiles_remaining();
                let state = stored.state;
                StateResponse::Active {
                    room_id: room.id,
                    status: room.status,
                    current_turn: state.current_turn,
                    placed_tiles: state.placed_tiles,
                    current_tile_p1: state.current_tile_p1,
                    current_tile_p2: state.current_tile_p2,
                    player1_score: state.player1_score,
                    player2_score: state.player2_score,
                    winner: state.winner,
                    tiles_remaining,
                }
            }
        }
    }
}

/// GET /game/state/{room_id}
///
/// Read-only; a room nobody has joined yet answers with a waiting payload.
async fn get_state(
    room_id: RoomId,
    app_state: web::Data<AppState>,
) -> Result<web::Json<StateResponse>, AppError> {
    let RoomId(id) = room_id;

    let snapshot = with_txn(&app_state, move |txn| {
        Box::pin(async move { SessionService::new().get_state(txn, &id).await })
    })
    .await?;

    Ok(web::Json(snapshot.into()))
}

#[derive(Debug, Deserialize)]
struct PlaceTileRequest {
    room_id: Option<String>,
    #[serde(alias = "user_id")]
    player_id: Option<i64>,
    q: Option<i32>,
    r: Option<i32>,
    tile_id: Option<String>,
    rotation: Option<i32>,
}

impl From<PlaceTileRequest> for PlaceTileInput {
    fn from(req: PlaceTileRequest) -> Self {
        PlaceTileInput {
            room_id: req.room_id,
            player_id: req.player_id,
            q: req.q,
            r: req.r,
            tile_id: req.tile_id,
            rotation: req.rotation,
        }
    }
}

#[derive(Debug, Serialize)]
struct PlaceTileResponse {
    message: &'static str,
    current_turn: u8,
    game_over: bool,
    winner: Option<u8>,
}

/// POST /game/place_tile
///
/// Places a tile for the player holding the turn and draws their next tile.
async fn place_tile(
    body: ValidatedJson<PlaceTileRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<PlaceTileResponse>, AppError> {
    let input = PlaceTileInput::from(body.into_inner());

    let outcome = with_txn(&app_state, move |txn| {
        Box::pin(async move { SessionService::new().place_tile(txn, input).await })
    })
    .await?;

    if let Some(notification) = outcome.notification() {
        dispatch(app_state.notifier(), notification);
    }

    Ok(web::Json(PlaceTileResponse {
        message: "Tile placed",
        current_turn: outcome.current_turn,
        game_over: outcome.game_over,
        winner: outcome.winner,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/game/state/{room_id}", web::get().to(get_state))
        .route("/game/place_tile", web::post().to(place_tile));
}
