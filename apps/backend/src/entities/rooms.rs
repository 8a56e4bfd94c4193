use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    #[sea_orm(string_value = "waiting")]
    Waiting,
    #[sea_orm(string_value = "playing")]
    Playing,
    #[sea_orm(string_value = "finished")]
    Finished,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rooms")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Creator of the room
    #[sea_orm(column_name = "player1_id")]
    pub player1_id: i64,
    /// Equals `player1_id` until an opponent claims the room
    #[sea_orm(column_name = "player2_id")]
    pub player2_id: i64,
    pub status: RoomStatus,
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
        belongs_to = "super::users::Entity",
        from = "Column::Player1Id",
        to = "super::users::Column::Id"
    )]
    Player1,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::Player2Id",
        to = "super::users::Column::Id"
    )]
    Player2,
    #[sea_orm(has_one = "super::game_sessions::Entity")]
    GameSession,
    #[sea_orm(has_many = "super::tile_placements::Entity")]
    TilePlacements,
}

impl Related<super::game_sessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameSession.def()
    }
}

impl Related<super::tile_placements::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TilePlacements.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
