//! Quick match route.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::services::matchmaking::MatchmakingService;
use crate::services::notify::dispatch;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct QuickMatchRequest {
    #[serde(alias = "user_id")]
    player_id: Option<i64>,
}

#[derive(Debug, Serialize)]
struct QuickMatchResponse {
    message: &'static str,
    room_id: String,
    player_number: u8,
}

/// POST /quick_match
///
/// Joins the oldest waiting room opened by someone else, or opens a new one.
async fn quick_match(
    body: ValidatedJson<QuickMatchRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let player_id = body.player_id;

    let outcome = with_txn(&app_state, move |txn| {
        Box::pin(async move {
            MatchmakingService::new()
                .quick_match(txn, player_id)
                .await
        })
    })
    .await?;

    if let Some(notification) = player_id.and_then(|id| outcome.notification(id)) {
        dispatch(app_state.notifier(), notification);
    }

    let message = if outcome.player_number == 2 {
        "Match found"
    } else {
        "Waiting for opponent"
    };
    Ok(HttpResponse::Ok().json(QuickMatchResponse {
        message,
        room_id: outcome.room_id,
        player_number: outcome.player_number,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/quick_match", web::post().to(quick_match));
}
