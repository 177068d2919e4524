//! Per-caller projection of a room.
//!
//! Option effects stay hidden. Ideologies of other players stay hidden until
//! the game is FINISHED; the caller always sees their own.

use serde::Serialize;

use crate::domain::catalog::{Catalog, MasterIdeology, PolicyOption};
use crate::domain::city::CityState;
use crate::domain::lifecycle::RoomAggregate;
use crate::domain::room::{RoomStatus, VoteResult};
use crate::errors::domain::{DomainError, InfraErrorKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicPlayer {
    pub user_id: String,
    pub display_name: String,
    pub is_host: bool,
    pub is_ready: bool,
    pub has_voted: bool,
    pub is_petition_used: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ideology: Option<MasterIdeology>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PassedPolicy {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelfView {
    pub user_id: String,
    pub ideology: Option<MasterIdeology>,
    pub current_vote: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomView {
    pub room_id: String,
    pub host_id: String,
    pub status: RoomStatus,
    pub turn: u32,
    pub max_turns: u32,
    pub city: CityState,
    pub is_collapsed: bool,
    pub current_options: Vec<PolicyOption>,
    pub passed_policies: Vec<PassedPolicy>,
    pub deck_remaining: usize,
    pub last_result: Option<VoteResult>,
    pub players: Vec<PublicPlayer>,
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub me: Option<SelfView>,
}

fn unresolved(id: &str) -> DomainError {
    DomainError::infra(
        InfraErrorKind::DataCorruption,
        format!("room references unknown policy '{id}'"),
    )
}

/// Build the view for `viewer` (who may be an outsider).
pub fn room_view(
    agg: &RoomAggregate,
    catalog: &Catalog,
    viewer: Option<&str>,
) -> Result<RoomView, DomainError> {
    let room = &agg.room;
    let finished = room.status == RoomStatus::Finished;

    let current_options = room
        .current_policy_ids
        .iter()
        .map(|id| {
            room.resolve_policy(id, catalog)
                .map(PolicyOption::from)
                .ok_or_else(|| unresolved(id))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let passed_policies = room
        .passed_policy_ids
        .iter()
        .map(|id| {
            room.resolve_policy(id, catalog)
                .map(|p| PassedPolicy {
                    id: p.id.clone(),
                    title: p.title.clone(),
                })
                .ok_or_else(|| unresolved(id))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let lookup = |id: &Option<String>| id.as_deref().and_then(|i| catalog.ideology(i)).cloned();

    let players = agg
        .players
        .iter()
        .map(|p| PublicPlayer {
            user_id: p.user_id.clone(),
            display_name: p.display_name.clone(),
            is_host: p.is_host,
            is_ready: p.is_ready,
            has_voted: room
                .votes
                .get(&p.user_id)
                .is_some_and(|choice| choice.is_some()),
            is_petition_used: p.is_petition_used,
            ideology: if finished { lookup(&p.ideology_id) } else { None },
        })
        .collect();

    let me = viewer.and_then(|uid| agg.player(uid)).map(|p| SelfView {
        user_id: p.user_id.clone(),
        ideology: lookup(&p.ideology_id),
        current_vote: p.current_vote.clone(),
    });

    Ok(RoomView {
        room_id: room.id.clone(),
        host_id: room.host_id.clone(),
        status: room.status,
        turn: room.turn,
        max_turns: room.max_turns,
        city: room.city,
        is_collapsed: room.is_collapsed,
        current_options,
        passed_policies,
        deck_remaining: room.deck_ids.len(),
        last_result: room.last_result.clone(),
        players,
        me,
    })
}
