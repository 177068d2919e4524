//! Room lifecycle transitions over the full aggregate (room + players).
//!
//! Every operation checks its guards in a fixed order (membership and input,
//! then role, then status, then rule preconditions) and leaves the aggregate
//! untouched when a guard fails.

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::catalog::{Catalog, PolicyDraft};
use crate::domain::deck::{draw_hand, shuffle_ids, HAND_SIZE};
use crate::domain::player::{normalize_display_name, Player};
use crate::domain::resolution::resolve_votes;
use crate::domain::room::{Room, RoomStatus, VoteResult};
use crate::errors::domain::{
    ConflictKind, DomainError, ForbiddenKind, NotFoundKind, ValidationKind,
};

pub const MAX_PLAYERS: usize = 4;
pub const MIN_PLAYERS: usize = 2;
pub const PETITION_MAX_CHARS: usize = 500;

/// A room together with its players, in join order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomAggregate {
    pub room: Room,
    pub players: Vec<Player>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveOutcome {
    Remaining,
    /// Last player left; the room should be deleted
    RoomEmptied,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextTurnOutcome {
    /// A new hand was dealt
    Dealt,
    /// Deck exhausted; game finished instead
    Finished,
}

impl RoomAggregate {
    pub fn player(&self, user_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.user_id == user_id)
    }

    fn player_mut(&mut self, user_id: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.user_id == user_id)
    }

    fn require_member(&self, user_id: &str) -> Result<&Player, DomainError> {
        self.player(user_id).ok_or_else(|| {
            DomainError::conflict(
                ConflictKind::NotInRoom,
                format!("user is not a player in room {}", self.room.id),
            )
        })
    }

    fn require_status(&self, expected: RoomStatus, action: &str) -> Result<(), DomainError> {
        if self.room.status != expected {
            return Err(DomainError::phase_mismatch(format!(
                "cannot {action} while room is {}, expected {expected}",
                self.room.status
            )));
        }
        Ok(())
    }

    /// Every seated player has a non-empty ballot.
    pub fn all_voted(&self) -> bool {
        !self.players.is_empty()
            && self.players.iter().all(|p| {
                self.room
                    .votes
                    .get(&p.user_id)
                    .is_some_and(|choice| choice.is_some())
            })
    }

    fn clear_ballots(&mut self) {
        let ids: Vec<String> = self.players.iter().map(|p| p.user_id.clone()).collect();
        self.room.reset_votes(ids.iter().map(String::as_str));
        for p in &mut self.players {
            p.current_vote = None;
        }
    }

    fn used_ideologies(&self) -> Vec<&str> {
        self.players
            .iter()
            .filter_map(|p| p.ideology_id.as_deref())
            .collect()
    }
}

fn pick_ideology<R: Rng + ?Sized>(
    catalog: &Catalog,
    taken: &[&str],
    rng: &mut R,
) -> Result<String, DomainError> {
    let free: Vec<&str> = catalog
        .ideologies
        .iter()
        .map(|i| i.id.as_str())
        .filter(|id| !taken.contains(id))
        .collect();
    free.choose(rng)
        .map(|id| (*id).to_string())
        .ok_or_else(|| {
            DomainError::conflict(ConflictKind::IdeologyExhausted, "no unused ideology left")
        })
}

/// New LOBBY room with the creator seated as host.
pub fn create_room<R: Rng + ?Sized>(
    room_id: impl Into<String>,
    host_id: &str,
    display_name: &str,
    catalog: &Catalog,
    rng: &mut R,
) -> Result<RoomAggregate, DomainError> {
    let name = normalize_display_name(display_name)?;
    let ideology = pick_ideology(catalog, &[], rng)?;
    let mut room = Room::new(room_id, host_id);
    room.votes.insert(host_id.to_string(), None);
    Ok(RoomAggregate {
        room,
        players: vec![Player::host(host_id, name, Some(ideology))],
    })
}

pub fn join<R: Rng + ?Sized>(
    agg: &mut RoomAggregate,
    user_id: &str,
    display_name: &str,
    catalog: &Catalog,
    rng: &mut R,
) -> Result<(), DomainError> {
    let name = normalize_display_name(display_name)?;
    if agg.player(user_id).is_some() {
        return Err(DomainError::conflict(
            ConflictKind::AlreadyInRoom,
            "user already joined this room",
        ));
    }
    agg.require_status(RoomStatus::Lobby, "join")?;
    if agg.players.len() >= MAX_PLAYERS {
        return Err(DomainError::conflict(
            ConflictKind::RoomFull,
            format!("room already has {MAX_PLAYERS} players"),
        ));
    }
    let ideology = pick_ideology(catalog, &agg.used_ideologies(), rng)?;
    agg.players.push(Player::new(user_id, name, Some(ideology)));
    agg.room.votes.insert(user_id.to_string(), None);
    Ok(())
}

/// Remove the player; promote the earliest remaining joiner if the host left.
pub fn leave(agg: &mut RoomAggregate, user_id: &str) -> Result<LeaveOutcome, DomainError> {
    agg.require_member(user_id)?;
    agg.players.retain(|p| p.user_id != user_id);
    agg.room.votes.remove(user_id);

    let Some(next_host) = agg.players.first_mut() else {
        return Ok(LeaveOutcome::RoomEmptied);
    };
    if agg.room.host_id == user_id {
        next_host.is_host = true;
        agg.room.host_id = next_host.user_id.clone();
    }
    Ok(LeaveOutcome::Remaining)
}

/// Flip the caller's ready flag and return the new value.
pub fn toggle_ready(agg: &mut RoomAggregate, user_id: &str) -> Result<bool, DomainError> {
    agg.require_member(user_id)?;
    agg.require_status(RoomStatus::Lobby, "toggle ready")?;
    let player = agg.player_mut(user_id).ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Player, "player vanished from room")
    })?;
    player.is_ready = !player.is_ready;
    Ok(player.is_ready)
}

/// Shuffle the whole catalog into a deck, deal the first hand, turn 1.
pub fn start<R: Rng + ?Sized>(
    agg: &mut RoomAggregate,
    user_id: &str,
    catalog: &Catalog,
    rng: &mut R,
) -> Result<(), DomainError> {
    let caller = agg.require_member(user_id)?;
    if !caller.is_host || agg.room.host_id != user_id {
        return Err(DomainError::forbidden(
            ForbiddenKind::NotHost,
            "only the host can start the game",
        ));
    }
    agg.require_status(RoomStatus::Lobby, "start")?;
    if agg.players.len() < MIN_PLAYERS {
        return Err(DomainError::validation(
            ValidationKind::NotEnoughPlayers,
            format!("at least {MIN_PLAYERS} players are required"),
        ));
    }
    if agg.players.iter().any(|p| !p.is_host && !p.is_ready) {
        return Err(DomainError::validation(
            ValidationKind::NotAllReady,
            "every non-host player must be ready",
        ));
    }

    let mut deck = catalog.policy_ids();
    shuffle_ids(&mut deck, rng);
    let hand = draw_hand(&mut deck, HAND_SIZE);

    agg.room.current_policy_ids = hand;
    agg.room.deck_ids = deck;
    agg.room.turn = 1;
    agg.room.last_result = None;
    agg.room.status = RoomStatus::Voting;
    agg.clear_ballots();
    Ok(())
}

/// Record (or overwrite) the caller's ballot. Returns whether every player
/// has now voted.
pub fn vote(agg: &mut RoomAggregate, user_id: &str, policy_id: &str) -> Result<bool, DomainError> {
    agg.require_member(user_id)?;
    if !agg.room.current_policy_ids.iter().any(|id| id == policy_id) {
        return Err(DomainError::validation(
            ValidationKind::InvalidPolicy,
            format!("policy '{policy_id}' is not one of the current options"),
        ));
    }
    agg.require_status(RoomStatus::Voting, "vote")?;

    let player = agg.player_mut(user_id).ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Player, "player vanished from room")
    })?;
    player.current_vote = Some(policy_id.to_string());
    agg.room
        .votes
        .insert(user_id.to_string(), Some(policy_id.to_string()));
    Ok(agg.all_voted())
}

pub fn resolve<R: Rng + ?Sized>(
    agg: &mut RoomAggregate,
    catalog: &Catalog,
    rng: &mut R,
) -> Result<VoteResult, DomainError> {
    agg.require_status(RoomStatus::Voting, "resolve")?;
    if !agg.all_voted() {
        return Err(DomainError::validation(
            ValidationKind::NotAllVoted,
            "some players have not voted yet",
        ));
    }
    resolve_votes(&mut agg.room, catalog, rng)
}

/// Deal the next hand from the deck, or finish the game when it is empty.
///
/// An exhausted deck moves straight to FINISHED rather than opening a
/// VOTING phase with an empty hand that nobody could vote in.
pub fn next_turn(agg: &mut RoomAggregate) -> Result<NextTurnOutcome, DomainError> {
    agg.require_status(RoomStatus::Result, "advance the turn")?;

    let hand = draw_hand(&mut agg.room.deck_ids, HAND_SIZE);
    if hand.is_empty() {
        agg.room.status = RoomStatus::Finished;
        return Ok(NextTurnOutcome::Finished);
    }
    agg.room.current_policy_ids = hand;
    agg.room.turn += 1;
    agg.room.last_result = None;
    agg.room.status = RoomStatus::Voting;
    agg.clear_ballots();
    Ok(NextTurnOutcome::Dealt)
}

/// Trim and bound petition text.
pub fn normalize_petition_text(raw: &str) -> Result<String, DomainError> {
    let text = raw.trim();
    let len = text.chars().count();
    if len == 0 || len > PETITION_MAX_CHARS {
        return Err(DomainError::validation(
            ValidationKind::InvalidPetition,
            format!("petition must be 1 to {PETITION_MAX_CHARS} characters"),
        ));
    }
    Ok(text.to_string())
}

/// Guards a petition must pass before it is sent for review.
pub fn check_petition(agg: &RoomAggregate, user_id: &str) -> Result<(), DomainError> {
    let player = agg.require_member(user_id)?;
    agg.require_status(RoomStatus::Voting, "petition")?;
    if player.is_petition_used {
        return Err(DomainError::conflict(
            ConflictKind::PetitionUsed,
            "petition already used this game",
        ));
    }
    Ok(())
}

/// Add an approved petition to the bottom of the deck and consume the
/// player's petition. Returns the new policy id.
pub fn accept_petition<R: Rng + ?Sized>(
    agg: &mut RoomAggregate,
    user_id: &str,
    draft: PolicyDraft,
    catalog: &Catalog,
    rng: &mut R,
) -> Result<String, DomainError> {
    let player = agg.require_member(user_id)?;
    if player.is_petition_used {
        return Err(DomainError::conflict(
            ConflictKind::PetitionUsed,
            "petition already used this game",
        ));
    }
    if agg.room.status == RoomStatus::Finished {
        return Err(DomainError::phase_mismatch(
            "game finished before the petition was reviewed",
        ));
    }

    let id = agg.room.mint_generated_policy(draft, catalog, rng);
    agg.room.deck_ids.push(id.clone());
    if let Some(p) = agg.player_mut(user_id) {
        p.is_petition_used = true;
    }
    Ok(id)
}
