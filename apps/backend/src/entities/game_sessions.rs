use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "game_sessions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_name = "room_id")]
    pub room_id: String,
    #[sea_orm(column_name = "current_turn", column_type = "SmallInteger")]
    pub current_turn: i16,
    /// Remaining tile type ids, front first
    pub deck: Json,
    #[sea_orm(column_name = "current_tile_p1")]
    pub current_tile_p1: Option<String>,
    #[sea_orm(column_name = "current_tile_p2")]
    pub current_tile_p2: Option<String>,
    #[sea_orm(column_name = "player1_score")]
    pub player1_score: i32,
    #[sea_orm(column_name = "player2_score")]
    pub player2_score: i32,
    #[sea_orm(column_type = "SmallInteger")]
    pub winner: Option<i16>,
    #[sea_orm(column_name = "lock_version")]
    pub lock_version: i32,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::rooms::Entity",
        from = "Column::RoomId",
        to = "super::rooms::Column::Id"
    )]
    Room,
}

impl Related<super::rooms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Room.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
