use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum MasterPolicies {
    Table,
    Id,
    Category,
    Title,
    Description,
    NewsFlash,
    Effects,
    SortOrder,
    CreatedAt,
}

#[derive(Iden)]
enum MasterIdeologies {
    Table,
    Id,
    Name,
    Description,
    Coefficients,
    SortOrder,
    CreatedAt,
}

#[derive(Iden)]
enum Rooms {
    Table,
    Id,
    HostId,
    Status,
    Turn,
    MaxTurns,
    Economy,
    Welfare,
    Education,
    Environment,
    Security,
    HumanRights,
    IsCollapsed,
    CurrentPolicyIds,
    DeckIds,
    PassedPolicyIds,
    Votes,
    LastResult,
    GeneratedPolicies,
    LockVersion,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum RoomPlayers {
    Table,
    Id,
    RoomId,
    UserId,
    DisplayName,
    IsHost,
    IsReady,
    IsPetitionUsed,
    IdeologyId,
    CurrentVote,
    JoinedAt,
    UpdatedAt,
}

fn dimension_col<T: IntoIden>(name: T) -> ColumnDef {
    let mut col = ColumnDef::new(name);
    col.integer().not_null().default(50);
    col
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ----- master catalog -----
        manager
            .create_table(
                Table::create()
                    .table(MasterPolicies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MasterPolicies::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MasterPolicies::Category).string_len(32).not_null())
                    .col(ColumnDef::new(MasterPolicies::Title).string().not_null())
                    .col(ColumnDef::new(MasterPolicies::Description).text().not_null())
                    .col(ColumnDef::new(MasterPolicies::NewsFlash).text().not_null())
                    .col(ColumnDef::new(MasterPolicies::Effects).json().not_null())
                    .col(
                        ColumnDef::new(MasterPolicies::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(MasterPolicies::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MasterIdeologies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MasterIdeologies::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MasterIdeologies::Name).string().not_null())
                    .col(ColumnDef::new(MasterIdeologies::Description).text().not_null())
                    .col(ColumnDef::new(MasterIdeologies::Coefficients).json().not_null())
                    .col(
                        ColumnDef::new(MasterIdeologies::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(MasterIdeologies::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // ----- rooms -----
        manager
            .create_table(
                Table::create()
                    .table(Rooms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Rooms::Id)
                            .string_len(26)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Rooms::HostId).string_len(128).not_null())
                    .col(ColumnDef::new(Rooms::Status).string_len(16).not_null())
                    .col(ColumnDef::new(Rooms::Turn).integer().not_null().default(0))
                    .col(ColumnDef::new(Rooms::MaxTurns).integer().not_null().default(10))
                    .col(&mut dimension_col(Rooms::Economy))
                    .col(&mut dimension_col(Rooms::Welfare))
                    .col(&mut dimension_col(Rooms::Education))
                    .col(&mut dimension_col(Rooms::Environment))
                    .col(&mut dimension_col(Rooms::Security))
                    .col(&mut dimension_col(Rooms::HumanRights))
                    .col(
                        ColumnDef::new(Rooms::IsCollapsed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Rooms::CurrentPolicyIds).json().not_null())
                    .col(ColumnDef::new(Rooms::DeckIds).json().not_null())
                    .col(ColumnDef::new(Rooms::PassedPolicyIds).json().not_null())
                    .col(ColumnDef::new(Rooms::Votes).json().not_null())
                    .col(ColumnDef::new(Rooms::LastResult).json().null())
                    .col(ColumnDef::new(Rooms::GeneratedPolicies).json().not_null())
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
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_rooms_status")
                    .table(Rooms::Table)
                    .col(Rooms::Status)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // ----- room_players -----
        manager
            .create_table(
                Table::create()
                    .table(RoomPlayers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RoomPlayers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RoomPlayers::RoomId).string_len(26).not_null())
                    .col(ColumnDef::new(RoomPlayers::UserId).string_len(128).not_null())
                    .col(ColumnDef::new(RoomPlayers::DisplayName).string_len(64).not_null())
                    .col(
                        ColumnDef::new(RoomPlayers::IsHost)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(RoomPlayers::IsReady)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(RoomPlayers::IsPetitionUsed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(RoomPlayers::IdeologyId).string_len(64).null())
                    .col(ColumnDef::new(RoomPlayers::CurrentVote).string_len(64).null())
                    .col(
                        ColumnDef::new(RoomPlayers::JoinedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RoomPlayers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_room_players_room_id")
                            .from(RoomPlayers::Table, RoomPlayers::RoomId)
                            .to(Rooms::Table, Rooms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_room_players_room_user")
                    .table(RoomPlayers::Table)
                    .col(RoomPlayers::RoomId)
                    .col(RoomPlayers::UserId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RoomPlayers::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Rooms::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(MasterIdeologies::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(MasterPolicies::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}
