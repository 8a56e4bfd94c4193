//! SeaORM adapter for game sessions - generic over ConnectionTrait.

use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

use crate::entities::game_sessions;
use crate::infra::db_errors::OPTIMISTIC_LOCK_PREFIX;

pub mod dto;

pub use dto::{SessionCreate, SessionUpdate};

/// Helper: Apply optimistic update with lock version check, then refetch.
///
/// - Adds lock_version increment and updated_at to the update
/// - Filters by room_id and current_lock_version
/// - Checks rows_affected to distinguish NotFound vs OptimisticLock
/// - Refetches and returns the updated model
async fn optimistic_update_then_fetch<C, F>(
    conn: &C,
    room_id: &str,
    current_lock_version: i32,
    configure_update: F,
) -> Result<game_sessions::Model, sea_orm::DbErr>
where
    C: ConnectionTrait + Send + Sync,
    F: FnOnce(
        sea_orm::UpdateMany<game_sessions::Entity>,
    ) -> sea_orm::UpdateMany<game_sessions::Entity>,
{
    let now = time::OffsetDateTime::now_utc();

    let result = configure_update(game_sessions::Entity::update_many())
        .col_expr(game_sessions::Column::UpdatedAt, Expr::val(now).into())
        .col_expr(
            game_sessions::Column::LockVersion,
            Expr::col(game_sessions::Column::LockVersion).add(1),
        )
        .filter(game_sessions::Column::RoomId.eq(room_id))
        .filter(game_sessions::Column::LockVersion.eq(current_lock_version))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        let session = find_by_room(conn, room_id).await?;
        if let Some(session) = session {
            let payload = format!(
                "{OPTIMISTIC_LOCK_PREFIX}{{\"expected\":{},\"actual\":{}}}",
                current_lock_version, session.lock_version
            );
            return Err(sea_orm::DbErr::Custom(payload));
        } else {
            return Err(sea_orm::DbErr::RecordNotFound(
                "Game session not found".to_string(),
            ));
        }
    }

    find_by_room(conn, room_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Game session not found".to_string()))
}

pub async fn find_by_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
) -> Result<Option<game_sessions::Model>, sea_orm::DbErr> {
    game_sessions::Entity::find_by_id(room_id.to_string())
        .one(conn)
        .await
}

pub async fn create_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: SessionCreate,
) -> Result<game_sessions::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let session_active = game_sessions::ActiveModel {
        room_id: Set(dto.room_id),
        current_turn: Set(1),
        deck: Set(dto.deck),
        current_tile_p1: Set(dto.current_tile_p1),
        current_tile_p2: Set(dto.current_tile_p2),
        player1_score: Set(0),
        player2_score: Set(0),
        winner: Set(None),
        lock_version: Set(1),
        created_at: Set(now),
        updated_at: Set(now),
    };

    session_active.insert(conn).await
}

pub async fn update_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: SessionUpdate,
) -> Result<game_sessions::Model, sea_orm::DbErr> {
    optimistic_update_then_fetch(conn, &dto.room_id, dto.expected_lock_version, |update| {
        update
            .col_expr(
                game_sessions::Column::CurrentTurn,
                Expr::val(dto.current_turn).into(),
            )
            .col_expr(game_sessions::Column::Deck, Expr::val(dto.deck).into())
            .col_expr(
                game_sessions::Column::CurrentTileP1,
                Expr::val(dto.current_tile_p1).into(),
            )
            .col_expr(
                game_sessions::Column::CurrentTileP2,
                Expr::val(dto.current_tile_p2).into(),
            )
            .col_expr(
                game_sessions::Column::Player1Score,
                Expr::val(dto.player1_score).into(),
            )
            .col_expr(
                game_sessions::Column::Player2Score,
                Expr::val(dto.player2_score).into(),
            )
            .col_expr(game_sessions::Column::Winner, Expr::val(dto.winner).into())
    })
    .await
}

pub async fn delete_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, sea_orm::DbErr> {
    let result = game_sessions::Entity::delete_many().exec(conn).await?;
    Ok(result.rows_affected)
}
