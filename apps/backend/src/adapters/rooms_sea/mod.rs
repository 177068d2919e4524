//! SeaORM adapter for rooms - generic over ConnectionTrait.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbBackend, EntityTrait, QueryFilter,
    QuerySelect, Set, UpdateMany,
};

use crate::entities::{room_players, rooms};

pub mod dto;

pub use dto::{RoomUpdateLastResult, RoomWrite};

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

/// Apply an update guarded by `lock_version`, bump the version, then refetch.
///
/// Zero affected rows means the room is gone (RecordNotFound) or another
/// writer got there first (`OPTIMISTIC_LOCK:` custom error).
async fn optimistic_update_then_fetch<C, F>(
    conn: &C,
    id: &str,
    current_lock_version: i32,
    configure_update: F,
) -> Result<rooms::Model, sea_orm::DbErr>
where
    C: ConnectionTrait + Send + Sync,
    F: FnOnce(UpdateMany<rooms::Entity>) -> UpdateMany<rooms::Entity>,
{
    let now = time::OffsetDateTime::now_utc();

    let result = configure_update(rooms::Entity::update_many())
        .col_expr(rooms::Column::UpdatedAt, Expr::val(now).into())
        .col_expr(
            rooms::Column::LockVersion,
            Expr::col(rooms::Column::LockVersion).add(1),
        )
        .filter(rooms::Column::Id.eq(id))
        .filter(rooms::Column::LockVersion.eq(current_lock_version))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return match rooms::Entity::find_by_id(id.to_string()).one(conn).await? {
            Some(room) => Err(sea_orm::DbErr::Custom(format!(
                "OPTIMISTIC_LOCK:{{\"expected\":{},\"actual\":{}}}",
                current_lock_version, room.lock_version
            ))),
            None => Err(sea_orm::DbErr::RecordNotFound(format!(
                "ROOM_NOT_FOUND:{id}"
            ))),
        };
    }

    rooms::Entity::find_by_id(id.to_string())
        .one(conn)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound(format!("ROOM_NOT_FOUND:{id}")))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
) -> Result<Option<rooms::Model>, sea_orm::DbErr> {
    rooms::Entity::find_by_id(room_id.to_string()).one(conn).await
}

/// Load a room and take a row lock for the rest of the transaction.
///
/// SQLite has no row locks. Its pools hold a single connection, so room
/// transactions never interleave and the plain select is enough there.
pub async fn lock_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
) -> Result<Option<rooms::Model>, sea_orm::DbErr> {
    let query = rooms::Entity::find_by_id(room_id.to_string());
    match conn.get_database_backend() {
        DbBackend::Sqlite => query.one(conn).await,
        _ => query.lock_exclusive().one(conn).await,
    }
}

pub async fn create_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RoomWrite,
) -> Result<rooms::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let [economy, welfare, education, environment, security, human_rights] = dto.city;
    let active = rooms::ActiveModel {
        id: Set(dto.id),
        host_id: Set(dto.host_id),
        status: Set(dto.status),
        turn: Set(dto.turn),
        max_turns: Set(dto.max_turns),
        economy: Set(economy),
        welfare: Set(welfare),
        education: Set(education),
        environment: Set(environment),
        security: Set(security),
        human_rights: Set(human_rights),
        is_collapsed: Set(dto.is_collapsed),
        current_policy_ids: Set(dto.current_policy_ids),
        deck_ids: Set(dto.deck_ids),
        passed_policy_ids: Set(dto.passed_policy_ids),
        votes: Set(dto.votes),
        last_result: Set(dto.last_result),
        generated_policies: Set(dto.generated_policies),
        lock_version: Set(1),
        created_at: Set(now),
        updated_at: Set(now),
    };
    active.insert(conn).await
}

/// Overwrite every mutable column of the room row.
pub async fn update_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RoomWrite,
    current_lock_version: i32,
) -> Result<rooms::Model, sea_orm::DbErr> {
    let id = dto.id.clone();
    let [economy, welfare, education, environment, security, human_rights] = dto.city;
    optimistic_update_then_fetch(conn, &id, current_lock_version, move |update| {
        update
            .col_expr(rooms::Column::HostId, Expr::val(dto.host_id).into())
            .col_expr(rooms::Column::Status, Expr::val(dto.status).into())
            .col_expr(rooms::Column::Turn, Expr::val(dto.turn).into())
            .col_expr(rooms::Column::MaxTurns, Expr::val(dto.max_turns).into())
            .col_expr(rooms::Column::Economy, Expr::val(economy).into())
            .col_expr(rooms::Column::Welfare, Expr::val(welfare).into())
            .col_expr(rooms::Column::Education, Expr::val(education).into())
            .col_expr(rooms::Column::Environment, Expr::val(environment).into())
            .col_expr(rooms::Column::Security, Expr::val(security).into())
            .col_expr(rooms::Column::HumanRights, Expr::val(human_rights).into())
            .col_expr(rooms::Column::IsCollapsed, Expr::val(dto.is_collapsed).into())
            .col_expr(
                rooms::Column::CurrentPolicyIds,
                Expr::val(dto.current_policy_ids).into(),
            )
            .col_expr(rooms::Column::DeckIds, Expr::val(dto.deck_ids).into())
            .col_expr(
                rooms::Column::PassedPolicyIds,
                Expr::val(dto.passed_policy_ids).into(),
            )
            .col_expr(rooms::Column::Votes, Expr::val(dto.votes).into())
            .col_expr(rooms::Column::LastResult, Expr::val(dto.last_result).into())
            .col_expr(
                rooms::Column::GeneratedPolicies,
                Expr::val(dto.generated_policies).into(),
            )
    })
    .await
}

pub async fn update_last_result<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RoomUpdateLastResult,
) -> Result<rooms::Model, sea_orm::DbErr> {
    optimistic_update_then_fetch(conn, &dto.id, dto.current_lock_version, move |update| {
        update.col_expr(rooms::Column::LastResult, Expr::val(dto.last_result).into())
    })
    .await
}

/// Delete the room and its players.
pub async fn delete_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
) -> Result<(), sea_orm::DbErr> {
    room_players::Entity::delete_many()
        .filter(room_players::Column::RoomId.eq(room_id))
        .exec(conn)
        .await?;
    let result = rooms::Entity::delete_by_id(room_id.to_string())
        .exec(conn)
        .await?;
    if result.rows_affected == 0 {
        return Err(sea_orm::DbErr::RecordNotFound(format!(
            "ROOM_NOT_FOUND:{room_id}"
        )));
    }
    Ok(())
}
