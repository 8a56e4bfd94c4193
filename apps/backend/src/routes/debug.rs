//! Debug endpoints: room listing and a full reset.

use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::db::txn::with_txn;
use crate::entities::rooms::RoomStatus;
use crate::error::AppError;
use crate::services::debug;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct DebugRoom {
    room_id: String,
    status: RoomStatus,
    player1: String,
    player2: String,
}

#[derive(Debug, Serialize)]
struct ClearResponse {
    message: &'static str,
    rooms_deleted: u64,
    sessions_deleted: u64,
}

/// GET /debug/rooms
async fn list_rooms(app_state: web::Data<AppState>) -> Result<web::Json<Vec<DebugRoom>>, AppError> {
    let rooms = with_txn(&app_state, |txn| Box::pin(debug::list_rooms(txn))).await?;

    Ok(web::Json(
        rooms
            .into_iter()
            .map(|room| DebugRoom {
                room_id: room.room_id,
                status: room.status,
                player1: room.player1,
                player2: room.player2.unwrap_or_else(|| "Waiting...".to_string()),
            })
            .collect(),
    ))
}

/// POST /debug/clear
async fn clear(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let summary = with_txn(&app_state, |txn| Box::pin(debug::clear_all(txn))).await?;

    Ok(HttpResponse::Ok().json(ClearResponse {
        message: "All rooms cleared",
        rooms_deleted: summary.rooms,
        sessions_deleted: summary.sessions,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/rooms", web::get().to(list_rooms))
        .route("/clear", web::post().to(clear));
}
