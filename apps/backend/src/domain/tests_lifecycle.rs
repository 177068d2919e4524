use crate::domain::deck::HAND_SIZE;
use crate::domain::lifecycle::{self, LeaveOutcome, NextTurnOutcome, MAX_PLAYERS};
use crate::domain::room::RoomStatus;
use crate::domain::test_room_helpers::{
    catalog, everyone_votes, lobby_with, rng, user, voting_with,
};
use crate::errors::domain::{ConflictKind, DomainError, ForbiddenKind, ValidationKind};

fn assert_validation(err: DomainError, kind: ValidationKind) {
    assert!(
        matches!(&err, DomainError::Validation(k, _) if *k == kind),
        "expected {kind:?}, got {err:?}"
    );
}

fn assert_conflict(err: DomainError, kind: ConflictKind) {
    assert!(
        matches!(&err, DomainError::Conflict(k, _) if *k == kind),
        "expected {kind:?}, got {err:?}"
    );
}

#[test]
fn create_seats_host_with_an_ideology() {
    let agg = lobby_with(1);
    assert_eq!(agg.room.status, RoomStatus::Lobby);
    assert_eq!(agg.room.host_id, "u1");
    assert_eq!(agg.players.len(), 1);
    assert!(agg.players[0].is_host);
    assert!(agg.players[0].ideology_id.is_some());
}

#[test]
fn create_rejects_blank_display_name() {
    let err = lifecycle::create_room("r", "u1", "  ", &catalog(), &mut rng(1)).unwrap_err();
    assert_validation(err, ValidationKind::InvalidDisplayName);
}

#[test]
fn joined_players_get_distinct_ideologies() {
    let agg = lobby_with(MAX_PLAYERS);
    let mut ids: Vec<_> = agg
        .players
        .iter()
        .map(|p| p.ideology_id.clone().unwrap())
        .collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), MAX_PLAYERS);
}

#[test]
fn ballot_keys_track_the_player_set() {
    let mut agg = lobby_with(3);
    let keys: Vec<_> = agg.room.votes.keys().cloned().collect();
    assert_eq!(keys, vec!["u1", "u2", "u3"]);
    assert!(agg.room.votes.values().all(Option::is_none));

    lifecycle::leave(&mut agg, "u2").unwrap();
    let keys: Vec<_> = agg.room.votes.keys().cloned().collect();
    assert_eq!(keys, vec!["u1", "u3"]);
}

#[test]
fn fifth_player_is_rejected() {
    let mut agg = lobby_with(MAX_PLAYERS);
    let err = lifecycle::join(&mut agg, "u5", "Late", &catalog(), &mut rng(2)).unwrap_err();
    assert_conflict(err, ConflictKind::RoomFull);
    assert_eq!(agg.players.len(), MAX_PLAYERS);
}

#[test]
fn joining_twice_is_rejected() {
    let mut agg = lobby_with(2);
    let err = lifecycle::join(&mut agg, "u2", "Again", &catalog(), &mut rng(2)).unwrap_err();
    assert_conflict(err, ConflictKind::AlreadyInRoom);
}

#[test]
fn join_after_start_is_a_phase_mismatch() {
    let mut agg = voting_with(2);
    let err = lifecycle::join(&mut agg, "u9", "Late", &catalog(), &mut rng(2)).unwrap_err();
    assert_validation(err, ValidationKind::PhaseMismatch);
}

#[test]
fn join_fails_when_ideologies_run_out() {
    let mut small = catalog();
    small.ideologies.truncate(1);
    let mut agg = lifecycle::create_room("r", "u1", "Host", &small, &mut rng(1)).unwrap();
    let err = lifecycle::join(&mut agg, "u2", "Guest", &small, &mut rng(1)).unwrap_err();
    assert_conflict(err, ConflictKind::IdeologyExhausted);
}

#[test]
fn ready_toggles_back_and_forth() {
    let mut agg = lobby_with(2);
    assert!(lifecycle::toggle_ready(&mut agg, "u2").unwrap());
    assert!(!lifecycle::toggle_ready(&mut agg, "u2").unwrap());
}

#[test]
fn ready_requires_membership_and_lobby() {
    let mut agg = lobby_with(2);
    assert_conflict(
        lifecycle::toggle_ready(&mut agg, "stranger").unwrap_err(),
        ConflictKind::NotInRoom,
    );
    let mut started = voting_with(2);
    assert_validation(
        lifecycle::toggle_ready(&mut started, "u2").unwrap_err(),
        ValidationKind::PhaseMismatch,
    );
}

#[test]
fn start_deals_a_hand_from_a_full_shuffle() {
    let agg = voting_with(3);
    let catalog = catalog();
    assert_eq!(agg.room.status, RoomStatus::Voting);
    assert_eq!(agg.room.turn, 1);
    assert_eq!(agg.room.current_policy_ids.len(), HAND_SIZE);
    assert_eq!(
        agg.room.current_policy_ids.len() + agg.room.deck_ids.len(),
        catalog.policies.len()
    );
    assert_eq!(agg.room.votes.len(), 3);
    assert!(agg.room.votes.values().all(Option::is_none));
}

#[test]
fn only_host_may_start() {
    let mut agg = lobby_with(2);
    lifecycle::toggle_ready(&mut agg, "u2").unwrap();
    let err = lifecycle::start(&mut agg, "u2", &catalog(), &mut rng(3)).unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(ForbiddenKind::NotHost, _)));
    assert_eq!(agg.room.status, RoomStatus::Lobby);
}

#[test]
fn start_needs_two_players() {
    let mut agg = lobby_with(1);
    let err = lifecycle::start(&mut agg, "u1", &catalog(), &mut rng(3)).unwrap_err();
    assert_validation(err, ValidationKind::NotEnoughPlayers);
}

#[test]
fn start_needs_every_guest_ready() {
    let mut agg = lobby_with(3);
    lifecycle::toggle_ready(&mut agg, "u2").unwrap();
    let err = lifecycle::start(&mut agg, "u1", &catalog(), &mut rng(3)).unwrap_err();
    assert_validation(err, ValidationKind::NotAllReady);
}

#[test]
fn starting_twice_is_a_phase_mismatch() {
    let mut agg = voting_with(2);
    let err = lifecycle::start(&mut agg, "u1", &catalog(), &mut rng(3)).unwrap_err();
    assert_validation(err, ValidationKind::PhaseMismatch);
}

#[test]
fn vote_overwrites_and_reports_completion() {
    let mut agg = voting_with(2);
    let options = agg.room.current_policy_ids.clone();
    assert!(!lifecycle::vote(&mut agg, "u1", &options[0]).unwrap());
    assert!(!lifecycle::vote(&mut agg, "u1", &options[1]).unwrap());
    assert_eq!(agg.room.votes["u1"].as_deref(), Some(options[1].as_str()));
    assert!(lifecycle::vote(&mut agg, "u2", &options[0]).unwrap());
}

#[test]
fn vote_for_unknown_option_is_invalid_in_any_status() {
    let mut agg = voting_with(2);
    let err = lifecycle::vote(&mut agg, "u1", "policy_999").unwrap_err();
    assert_validation(err, ValidationKind::InvalidPolicy);

    let mut lobby = lobby_with(2);
    let err = lifecycle::vote(&mut lobby, "u1", "policy_001").unwrap_err();
    assert_validation(err, ValidationKind::InvalidPolicy);
}

#[test]
fn outsider_cannot_vote() {
    let mut agg = voting_with(2);
    let option = agg.room.current_policy_ids[0].clone();
    let err = lifecycle::vote(&mut agg, "stranger", &option).unwrap_err();
    assert_conflict(err, ConflictKind::NotInRoom);
}

#[test]
fn resolve_requires_every_ballot() {
    let mut agg = voting_with(2);
    let option = agg.room.current_policy_ids[0].clone();
    lifecycle::vote(&mut agg, "u1", &option).unwrap();
    let err = lifecycle::resolve(&mut agg, &catalog(), &mut rng(5)).unwrap_err();
    assert_validation(err, ValidationKind::NotAllVoted);
    assert_eq!(agg.room.status, RoomStatus::Voting);
}

#[test]
fn next_turn_deals_and_clears() {
    let mut agg = voting_with(2);
    let option = agg.room.current_policy_ids[0].clone();
    everyone_votes(&mut agg, &option);
    lifecycle::resolve(&mut agg, &catalog(), &mut rng(5)).unwrap();
    let deck_before = agg.room.deck_ids.len();

    assert_eq!(lifecycle::next_turn(&mut agg).unwrap(), NextTurnOutcome::Dealt);
    assert_eq!(agg.room.status, RoomStatus::Voting);
    assert_eq!(agg.room.turn, 2);
    assert_eq!(agg.room.deck_ids.len(), deck_before - HAND_SIZE);
    assert!(agg.room.last_result.is_none());
    assert!(agg.room.votes.values().all(Option::is_none));
    assert!(agg.players.iter().all(|p| p.current_vote.is_none()));
}

#[test]
fn next_turn_only_from_result() {
    let mut agg = voting_with(2);
    let err = lifecycle::next_turn(&mut agg).unwrap_err();
    assert_validation(err, ValidationKind::PhaseMismatch);
}

#[test]
fn empty_deck_finishes_the_game() {
    let mut agg = voting_with(2);
    let option = agg.room.current_policy_ids[0].clone();
    everyone_votes(&mut agg, &option);
    lifecycle::resolve(&mut agg, &catalog(), &mut rng(5)).unwrap();
    agg.room.deck_ids.clear();

    assert_eq!(lifecycle::next_turn(&mut agg).unwrap(), NextTurnOutcome::Finished);
    assert_eq!(agg.room.status, RoomStatus::Finished);
    assert_eq!(agg.room.turn, 1);
}

#[test]
fn short_deck_deals_a_short_hand() {
    let mut agg = voting_with(2);
    let option = agg.room.current_policy_ids[0].clone();
    everyone_votes(&mut agg, &option);
    lifecycle::resolve(&mut agg, &catalog(), &mut rng(5)).unwrap();
    agg.room.deck_ids.truncate(2);

    lifecycle::next_turn(&mut agg).unwrap();
    assert_eq!(agg.room.current_policy_ids.len(), 2);
    assert!(agg.room.deck_ids.is_empty());
}

#[test]
fn host_leaving_promotes_earliest_joiner() {
    let mut agg = lobby_with(3);
    assert_eq!(lifecycle::leave(&mut agg, "u1").unwrap(), LeaveOutcome::Remaining);
    assert_eq!(agg.room.host_id, "u2");
    assert!(agg.players[0].is_host);
    assert_eq!(agg.players.iter().filter(|p| p.is_host).count(), 1);
}

#[test]
fn last_player_leaving_empties_room() {
    let mut agg = lobby_with(1);
    assert_eq!(lifecycle::leave(&mut agg, "u1").unwrap(), LeaveOutcome::RoomEmptied);
}

#[test]
fn leaving_mid_vote_drops_the_ballot_slot() {
    let mut agg = voting_with(3);
    let option = agg.room.current_policy_ids[0].clone();
    lifecycle::vote(&mut agg, "u1", &option).unwrap();
    lifecycle::vote(&mut agg, "u2", &option).unwrap();
    lifecycle::leave(&mut agg, &user(3)).unwrap();
    assert!(!agg.room.votes.contains_key("u3"));
    assert!(agg.all_voted());
    assert_eq!(agg.room.status, RoomStatus::Voting);
}

#[test]
fn outsider_cannot_leave() {
    let mut agg = lobby_with(2);
    assert_conflict(
        lifecycle::leave(&mut agg, "stranger").unwrap_err(),
        ConflictKind::NotInRoom,
    );
}
