//! Room repository: loads and stores the whole [`RoomAggregate`].
//!
//! A room is one `rooms` row plus its `room_players` rows. Writes go through
//! the row's `lock_version`, so a stale [`RoomRecord`] fails with an
//! optimistic-lock conflict instead of overwriting a newer state.

use std::collections::BTreeMap;

use sea_orm::ConnectionTrait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::adapters::room_players_sea::{self as players_adapter, RoomPlayerCreate, RoomPlayerUpdate};
use crate::adapters::rooms_sea::{self as rooms_adapter, RoomUpdateLastResult, RoomWrite};
use crate::domain::{CityState, Dimension, Player, Room, RoomAggregate, RoomStatus, VoteResult};
use crate::entities::{room_players, rooms};
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};

/// A loaded aggregate plus the bookkeeping needed to write it back.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomRecord {
    pub aggregate: RoomAggregate,
    pub lock_version: i32,
    /// user id -> `room_players.id`
    seat_ids: BTreeMap<String, i64>,
}

impl RoomRecord {
    pub fn room_id(&self) -> &str {
        &self.aggregate.room.id
    }
}

fn corrupt(what: &str, err: impl std::fmt::Display) -> DomainError {
    DomainError::infra(
        InfraErrorKind::DataCorruption,
        format!("room column {what} is malformed: {err}"),
    )
}

fn encode<T: Serialize>(what: &str, value: &T) -> Result<serde_json::Value, DomainError> {
    serde_json::to_value(value).map_err(|e| corrupt(what, e))
}

fn decode<T: DeserializeOwned>(what: &str, value: serde_json::Value) -> Result<T, DomainError> {
    serde_json::from_value(value).map_err(|e| corrupt(what, e))
}

fn status_to_db(status: RoomStatus) -> rooms::RoomStatus {
    match status {
        RoomStatus::Lobby => rooms::RoomStatus::Lobby,
        RoomStatus::Voting => rooms::RoomStatus::Voting,
        RoomStatus::Result => rooms::RoomStatus::Result,
        RoomStatus::Finished => rooms::RoomStatus::Finished,
    }
}

fn status_from_db(status: rooms::RoomStatus) -> RoomStatus {
    match status {
        rooms::RoomStatus::Lobby => RoomStatus::Lobby,
        rooms::RoomStatus::Voting => RoomStatus::Voting,
        rooms::RoomStatus::Result => RoomStatus::Result,
        rooms::RoomStatus::Finished => RoomStatus::Finished,
    }
}

fn to_write(room: &Room) -> Result<RoomWrite, DomainError> {
    let city = Dimension::ALL.map(|dim| room.city.get(dim));
    Ok(RoomWrite {
        id: room.id.clone(),
        host_id: room.host_id.clone(),
        status: status_to_db(room.status),
        turn: i32::try_from(room.turn).map_err(|e| corrupt("turn", e))?,
        max_turns: i32::try_from(room.max_turns).map_err(|e| corrupt("max_turns", e))?,
        city,
        is_collapsed: room.is_collapsed,
        current_policy_ids: encode("current_policy_ids", &room.current_policy_ids)?,
        deck_ids: encode("deck_ids", &room.deck_ids)?,
        passed_policy_ids: encode("passed_policy_ids", &room.passed_policy_ids)?,
        votes: encode("votes", &room.votes)?,
        last_result: room
            .last_result
            .as_ref()
            .map(|r| encode("last_result", r))
            .transpose()?,
        generated_policies: encode("generated_policies", &room.generated_policies)?,
    })
}

fn room_from_model(model: rooms::Model) -> Result<Room, DomainError> {
    let mut city = CityState::default();
    for (dim, value) in Dimension::ALL.into_iter().zip([
        model.economy,
        model.welfare,
        model.education,
        model.environment,
        model.security,
        model.human_rights,
    ]) {
        city.set(dim, value);
    }

    Ok(Room {
        id: model.id,
        host_id: model.host_id,
        status: status_from_db(model.status),
        turn: u32::try_from(model.turn).map_err(|e| corrupt("turn", e))?,
        max_turns: u32::try_from(model.max_turns).map_err(|e| corrupt("max_turns", e))?,
        city,
        is_collapsed: model.is_collapsed,
        current_policy_ids: decode("current_policy_ids", model.current_policy_ids)?,
        deck_ids: decode("deck_ids", model.deck_ids)?,
        passed_policy_ids: decode("passed_policy_ids", model.passed_policy_ids)?,
        votes: decode("votes", model.votes)?,
        last_result: model
            .last_result
            .map(|v| decode::<VoteResult>("last_result", v))
            .transpose()?,
        generated_policies: decode("generated_policies", model.generated_policies)?,
    })
}

fn player_from_model(model: &room_players::Model) -> Player {
    Player {
        user_id: model.user_id.clone(),
        display_name: model.display_name.clone(),
        is_host: model.is_host,
        is_ready: model.is_ready,
        is_petition_used: model.is_petition_used,
        ideology_id: model.ideology_id.clone(),
        current_vote: model.current_vote.clone(),
    }
}

fn assemble(
    model: rooms::Model,
    seats: Vec<room_players::Model>,
) -> Result<RoomRecord, DomainError> {
    let lock_version = model.lock_version;
    let room = room_from_model(model)?;
    let players = seats.iter().map(player_from_model).collect();
    let seat_ids = seats.into_iter().map(|s| (s.user_id, s.id)).collect();
    Ok(RoomRecord {
        aggregate: RoomAggregate { room, players },
        lock_version,
        seat_ids,
    })
}

fn room_not_found(room_id: &str) -> DomainError {
    DomainError::not_found(NotFoundKind::Room, format!("Room {room_id} not found"))
}

pub async fn find<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
) -> Result<Option<RoomRecord>, DomainError> {
    let Some(model) = rooms_adapter::find_by_id(conn, room_id).await? else {
        return Ok(None);
    };
    let seats = players_adapter::find_all_by_room(conn, room_id).await?;
    assemble(model, seats).map(Some)
}

/// Load a room for reading or fail with `NotFound(Room)`.
pub async fn require<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
) -> Result<RoomRecord, DomainError> {
    find(conn, room_id)
        .await?
        .ok_or_else(|| room_not_found(room_id))
}

/// Load a room for a read-modify-write cycle, row-locked where the backend
/// supports it.
pub async fn lock<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
) -> Result<RoomRecord, DomainError> {
    let model = rooms_adapter::lock_by_id(conn, room_id)
        .await?
        .ok_or_else(|| room_not_found(room_id))?;
    let seats = players_adapter::find_all_by_room(conn, room_id).await?;
    assemble(model, seats)
}

fn seat_create(room_id: &str, player: &Player) -> RoomPlayerCreate {
    RoomPlayerCreate {
        room_id: room_id.to_string(),
        user_id: player.user_id.clone(),
        display_name: player.display_name.clone(),
        is_host: player.is_host,
        is_ready: player.is_ready,
        is_petition_used: player.is_petition_used,
        ideology_id: player.ideology_id.clone(),
        current_vote: player.current_vote.clone(),
    }
}

/// Persist a freshly created aggregate.
pub async fn insert<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    aggregate: &RoomAggregate,
) -> Result<RoomRecord, DomainError> {
    let model = rooms_adapter::create_room(conn, to_write(&aggregate.room)?).await?;
    let mut seats = Vec::with_capacity(aggregate.players.len());
    for player in &aggregate.players {
        seats.push(players_adapter::create_player(conn, seat_create(&model.id, player)).await?);
    }
    assemble(model, seats)
}

/// Write the record's aggregate back.
///
/// Seats are diffed by user id: existing ones are updated, new ones
/// inserted, departed ones deleted. The room row update is guarded by
/// `lock_version` and bumps it.
pub async fn save<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    record: &RoomRecord,
) -> Result<RoomRecord, DomainError> {
    let room_id = record.room_id();

    for (user_id, seat_id) in &record.seat_ids {
        if record.aggregate.player(user_id).is_none() {
            players_adapter::delete_player(conn, *seat_id).await?;
        }
    }

    for player in &record.aggregate.players {
        match record.seat_ids.get(&player.user_id) {
            Some(&id) => {
                players_adapter::update_player(
                    conn,
                    RoomPlayerUpdate {
                        id,
                        is_host: player.is_host,
                        is_ready: player.is_ready,
                        is_petition_used: player.is_petition_used,
                        current_vote: player.current_vote.clone(),
                    },
                )
                .await?;
            }
            None => {
                players_adapter::create_player(conn, seat_create(room_id, player)).await?;
            }
        }
    }

    let model =
        rooms_adapter::update_room(conn, to_write(&record.aggregate.room)?, record.lock_version)
            .await?;
    let seats = players_adapter::find_all_by_room(conn, room_id).await?;
    assemble(model, seats)
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
) -> Result<(), DomainError> {
    rooms_adapter::delete_room(conn, room_id).await?;
    Ok(())
}

/// Replace only the last result column, guarded by `lock_version`.
pub async fn update_last_result<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
    expected_lock_version: i32,
    last_result: &VoteResult,
) -> Result<(), DomainError> {
    rooms_adapter::update_last_result(
        conn,
        RoomUpdateLastResult {
            id: room_id.to_string(),
            current_lock_version: expected_lock_version,
            last_result: Some(encode("last_result", last_result)?),
        },
    )
    .await?;
    Ok(())
}
