//! SeaORM adapter for room seats.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::room_players;

pub mod dto;

pub use dto::{RoomPlayerCreate, RoomPlayerUpdate};

/// All players of a room in join order.
pub async fn find_all_by_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
) -> Result<Vec<room_players::Model>, sea_orm::DbErr> {
    room_players::Entity::find()
        .filter(room_players::Column::RoomId.eq(room_id))
        .order_by_asc(room_players::Column::Id)
        .all(conn)
        .await
}

pub async fn create_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RoomPlayerCreate,
) -> Result<room_players::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let active = room_players::ActiveModel {
        id: NotSet,
        room_id: Set(dto.room_id),
        user_id: Set(dto.user_id),
        display_name: Set(dto.display_name),
        is_host: Set(dto.is_host),
        is_ready: Set(dto.is_ready),
        is_petition_used: Set(dto.is_petition_used),
        ideology_id: Set(dto.ideology_id),
        current_vote: Set(dto.current_vote),
        joined_at: Set(now),
        updated_at: Set(now),
    };
    active.insert(conn).await
}

pub async fn update_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RoomPlayerUpdate,
) -> Result<room_players::Model, sea_orm::DbErr> {
    let active = room_players::ActiveModel {
        id: Set(dto.id),
        room_id: NotSet,
        user_id: NotSet,
        display_name: NotSet,
        is_host: Set(dto.is_host),
        is_ready: Set(dto.is_ready),
        is_petition_used: Set(dto.is_petition_used),
        ideology_id: NotSet,
        current_vote: Set(dto.current_vote),
        joined_at: NotSet,
        updated_at: Set(time::OffsetDateTime::now_utc()),
    };
    active.update(conn).await
}

pub async fn delete_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<(), sea_orm::DbErr> {
    room_players::Entity::delete_many()
        .filter(room_players::Column::Id.eq(id))
        .exec(conn)
        .await?;
    Ok(())
}
