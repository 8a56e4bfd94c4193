use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    CreatedAt,
}

#[derive(Iden)]
enum Rooms {
    Table,
    Id,
    #[iden = "player1_id"]
    Player1Id,
    #[iden = "player2_id"]
    Player2Id,
    Status,
    LockVersion,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum GameSessions {
    Table,
    RoomId,
    CurrentTurn,
    Deck,
    #[iden = "current_tile_p1"]
    CurrentTileP1,
    #[iden = "current_tile_p2"]
    CurrentTileP2,
    #[iden = "player1_score"]
    Player1Score,
    #[iden = "player2_score"]
    Player2Score,
    Winner,
    LockVersion,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum TilePlacements {
    Table,
    Id,
    RoomId,
    Seq,
    Q,
    R,
    TileId,
    Player,
    Rotation,
    PlacedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // users
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string_len(80)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Email)
                            .string_len(120)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::PasswordHash)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // rooms; while waiting, player2_id repeats player1_id (open slot)
        manager
            .create_table(
                Table::create()
                    .table(Rooms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Rooms::Id)
                            .string_len(6)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Rooms::Player1Id).big_integer().not_null())
                    .col(ColumnDef::new(Rooms::Player2Id).big_integer().not_null())
                    .col(
                        ColumnDef::new(Rooms::Status)
                            .string_len(20)
                            .not_null()
                            .default("waiting"),
                    )
                    .col(
                        ColumnDef::new(Rooms::LockVersion)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Rooms::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Rooms::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rooms_player1_id")
                            .from(Rooms::Table, Rooms::Player1Id)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rooms_player2_id")
                            .from(Rooms::Table, Rooms::Player2Id)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // matchmaking scans waiting rooms oldest-first
        manager
            .create_index(
                Index::create()
                    .name("ix_rooms_status_created_at")
                    .table(Rooms::Table)
                    .col(Rooms::Status)
                    .col(Rooms::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // game_sessions (1:1 with rooms)
        manager
            .create_table(
                Table::create()
                    .table(GameSessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GameSessions::RoomId)
                            .string_len(6)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(GameSessions::CurrentTurn)
                            .small_integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(GameSessions::Deck).json().not_null())
                    .col(ColumnDef::new(GameSessions::CurrentTileP1).string_len(50).null())
                    .col(ColumnDef::new(GameSessions::CurrentTileP2).string_len(50).null())
                    .col(
                        ColumnDef::new(GameSessions::Player1Score)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(GameSessions::Player2Score)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(GameSessions::Winner).small_integer().null())
                    .col(
                        ColumnDef::new(GameSessions::LockVersion)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(GameSessions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GameSessions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_sessions_room_id")
                            .from(GameSessions::Table, GameSessions::RoomId)
                            .to(Rooms::Table, Rooms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // tile_placements (append-only board log)
        manager
            .create_table(
                Table::create()
                    .table(TilePlacements::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TilePlacements::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(TilePlacements::RoomId).string_len(6).not_null())
                    .col(ColumnDef::new(TilePlacements::Seq).integer().not_null())
                    .col(ColumnDef::new(TilePlacements::Q).integer().not_null())
                    .col(ColumnDef::new(TilePlacements::R).integer().not_null())
                    .col(ColumnDef::new(TilePlacements::TileId).string_len(50).not_null())
                    .col(ColumnDef::new(TilePlacements::Player).small_integer().not_null())
                    .col(
                        ColumnDef::new(TilePlacements::Rotation)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(TilePlacements::PlacedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tile_placements_room_id")
                            .from(TilePlacements::Table, TilePlacements::RoomId)
                            .to(Rooms::Table, Rooms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_tile_placements_room_seq")
                    .table(TilePlacements::Table)
                    .col(TilePlacements::RoomId)
                    .col(TilePlacements::Seq)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop in reverse order + drop index before table
        manager
            .drop_index(
                Index::drop()
                    .name("ux_tile_placements_room_seq")
                    .table(TilePlacements::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(TilePlacements::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(GameSessions::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ix_rooms_status_created_at")
                    .table(Rooms::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Rooms::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}
