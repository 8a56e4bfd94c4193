//! SeaORM adapter for tile placements - generic over ConnectionTrait.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::tile_placements;

pub mod dto;

pub use dto::PlacementCreate;

/// Append a placement. `(room_id, seq)` is unique, so two writers racing for
/// the same slot cannot both succeed.
pub async fn create_placement<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: PlacementCreate,
) -> Result<tile_placements::Model, sea_orm::DbErr> {
    let placement_active = tile_placements::ActiveModel {
        id: NotSet,
        room_id: Set(dto.room_id),
        seq: Set(dto.seq),
        q: Set(dto.q),
        r: Set(dto.r),
        tile_id: Set(dto.tile_id),
        player: Set(dto.player),
        rotation: Set(dto.rotation),
        placed_at: Set(time::OffsetDateTime::now_utc()),
    };

    placement_active.insert(conn).await
}

/// Placements of a room in board order.
pub async fn find_all_by_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
) -> Result<Vec<tile_placements::Model>, sea_orm::DbErr> {
    tile_placements::Entity::find()
        .filter(tile_placements::Column::RoomId.eq(room_id))
        .order_by_asc(tile_placements::Column::Seq)
        .all(conn)
        .await
}

pub async fn delete_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, sea_orm::DbErr> {
    let result = tile_placements::Entity::delete_many().exec(conn).await?;
    Ok(result.rows_affected)
}
