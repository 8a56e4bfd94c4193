//! SeaORM adapter for rooms - generic over ConnectionTrait.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::entities::rooms::{self, RoomStatus};
use crate::infra::db_errors::OPTIMISTIC_LOCK_PREFIX;

pub mod dto;

pub use dto::{RoomClaim, RoomCreate};

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
) -> Result<Option<rooms::Model>, sea_orm::DbErr> {
    rooms::Entity::find_by_id(room_id.to_string()).one(conn).await
}

/// Waiting rooms not created by `player_id`, oldest first.
pub async fn list_waiting_for<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    limit: u64,
) -> Result<Vec<rooms::Model>, sea_orm::DbErr> {
    rooms::Entity::find()
        .filter(rooms::Column::Status.eq(RoomStatus::Waiting))
        .filter(rooms::Column::Player1Id.ne(player_id))
        .order_by_asc(rooms::Column::CreatedAt)
        .order_by_asc(rooms::Column::Id)
        .limit(limit)
        .all(conn)
        .await
}

pub async fn create_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RoomCreate,
) -> Result<rooms::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let room_active = rooms::ActiveModel {
        id: Set(dto.id),
        player1_id: Set(dto.player_id),
        player2_id: Set(dto.player_id),
        status: Set(RoomStatus::Waiting),
        lock_version: Set(1),
        created_at: Set(now),
        updated_at: Set(now),
    };

    room_active.insert(conn).await
}

/// Compare-and-swap a waiting room into `playing` with `player_id` in seat 2.
///
/// Returns `None` when the room is no longer waiting or its lock version moved;
/// another request claimed it first.
pub async fn claim_waiting_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RoomClaim,
) -> Result<Option<rooms::Model>, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();

    let result = rooms::Entity::update_many()
        .col_expr(rooms::Column::Player2Id, Expr::val(dto.player_id).into())
        .col_expr(rooms::Column::Status, Expr::val(RoomStatus::Playing).into())
        .col_expr(rooms::Column::UpdatedAt, Expr::val(now).into())
        .col_expr(
            rooms::Column::LockVersion,
            Expr::col(rooms::Column::LockVersion).add(1),
        )
        .filter(rooms::Column::Id.eq(dto.id.as_str()))
        .filter(rooms::Column::LockVersion.eq(dto.expected_lock_version))
        .filter(rooms::Column::Status.eq(RoomStatus::Waiting))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Ok(None);
    }

    find_by_id(conn, &dto.id).await
}

/// Move a playing room to `finished`, guarded by its lock version.
pub async fn finish_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
    expected_lock_version: i32,
) -> Result<rooms::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();

    let result = rooms::Entity::update_many()
        .col_expr(rooms::Column::Status, Expr::val(RoomStatus::Finished).into())
        .col_expr(rooms::Column::UpdatedAt, Expr::val(now).into())
        .col_expr(
            rooms::Column::LockVersion,
            Expr::col(rooms::Column::LockVersion).add(1),
        )
        .filter(rooms::Column::Id.eq(room_id))
        .filter(rooms::Column::LockVersion.eq(expected_lock_version))
        .filter(rooms::Column::Status.eq(RoomStatus::Playing))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        // Distinguish a vanished room from a lost race
        return match find_by_id(conn, room_id).await? {
            Some(room) => Err(sea_orm::DbErr::Custom(format!(
                "{OPTIMISTIC_LOCK_PREFIX}{{\"expected\":{},\"actual\":{}}}",
                expected_lock_version, room.lock_version
            ))),
            None => Err(sea_orm::DbErr::RecordNotFound("Room not found".to_string())),
        };
    }

    find_by_id(conn, room_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Room not found".to_string()))
}

/// Every room, oldest first.
pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<rooms::Model>, sea_orm::DbErr> {
    rooms::Entity::find()
        .order_by_asc(rooms::Column::CreatedAt)
        .order_by_asc(rooms::Column::Id)
        .all(conn)
        .await
}

pub async fn delete_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, sea_orm::DbErr> {
    let result = rooms::Entity::delete_many().exec(conn).await?;
    Ok(result.rows_affected)
}
