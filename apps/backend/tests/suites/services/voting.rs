use backend_test_support::unique_helpers::unique_user_id;
use polis_backend::ai::ScriptedReviewer;
use polis_backend::domain::{Dimension, EffectVector, RoomStatus};
use polis_backend::ErrorCode;

use crate::common::{service, state_with_catalog, test_state};
use crate::support::factory::{first_option, started, uniform_catalog, vote_unanimously};

#[tokio::test]
async fn early_ballots_do_not_resolve() {
    let state = test_state(ScriptedReviewer::new()).await;
    let svc = service(&state);
    let room = started(&svc, 3).await;
    let policy = first_option(&svc, &room.room_id).await;

    let receipt = svc.vote(&room.room_id, room.host(), &policy).await.unwrap();
    assert!(receipt.success);
    assert!(!receipt.all_voted);
    assert_eq!(receipt.resolved, None);
    assert_eq!(receipt.last_result, None);

    let view = svc.room_view(&room.room_id, Some(room.host())).await.unwrap();
    assert_eq!(view.status, RoomStatus::Voting);
    assert!(view.players[0].has_voted);
    assert!(!view.players[1].has_voted);
    assert_eq!(view.me.unwrap().current_vote.as_deref(), Some(policy.as_str()));
}

#[tokio::test]
async fn revote_overwrites_the_ballot() {
    let state = test_state(ScriptedReviewer::new()).await;
    let svc = service(&state);
    let room = started(&svc, 2).await;
    let view = svc.room_view(&room.room_id, None).await.unwrap();
    let (a, b) = (&view.current_options[0].id, &view.current_options[1].id);

    svc.vote(&room.room_id, room.host(), a).await.unwrap();
    svc.vote(&room.room_id, room.host(), b).await.unwrap();

    let view = svc.room_view(&room.room_id, Some(room.host())).await.unwrap();
    assert_eq!(view.me.unwrap().current_vote.as_deref(), Some(b.as_str()));

    let receipt = svc.vote(&room.room_id, room.guest(1), b).await.unwrap();
    assert_eq!(receipt.resolved, Some(true));
    let result = receipt.last_result.unwrap();
    assert_eq!(&result.passed_policy_id, b);
    assert_eq!(result.vote_details.len(), 2);
    assert!(result.vote_details.values().all(|v| v == b));
}

#[tokio::test]
async fn vote_guards() {
    let state = test_state(ScriptedReviewer::new()).await;
    let svc = service(&state);
    let room = started(&svc, 2).await;
    let policy = first_option(&svc, &room.room_id).await;

    let err = svc
        .vote(&room.room_id, room.host(), "not-on-the-table")
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidPolicy);

    let err = svc
        .vote(&room.room_id, &unique_user_id(), &policy)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotInRoom);

    vote_unanimously(&svc, &room).await;
    let err = svc.vote(&room.room_id, room.host(), &policy).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::PhaseMismatch);
}

#[tokio::test]
async fn resolve_requires_every_ballot() {
    let state = test_state(ScriptedReviewer::new()).await;
    let svc = service(&state);
    let room = started(&svc, 2).await;
    let policy = first_option(&svc, &room.room_id).await;

    svc.vote(&room.room_id, room.host(), &policy).await.unwrap();
    let err = svc.resolve(&room.room_id).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotAllVoted);

    svc.vote(&room.room_id, room.guest(1), &policy).await.unwrap();
    let err = svc.resolve(&room.room_id).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::PhaseMismatch);
}

#[tokio::test]
async fn explicit_resolve_after_a_departure() {
    let state = test_state(ScriptedReviewer::new()).await;
    let svc = service(&state);
    let room = started(&svc, 3).await;
    let policy = first_option(&svc, &room.room_id).await;

    svc.vote(&room.room_id, room.host(), &policy).await.unwrap();
    svc.vote(&room.room_id, room.guest(1), &policy).await.unwrap();
    svc.leave_room(&room.room_id, room.guest(2)).await.unwrap();

    let resolved = svc.resolve(&room.room_id).await.unwrap();
    assert_eq!(resolved.status, RoomStatus::Result);
    assert_eq!(resolved.last_result.passed_policy_id, policy);
    assert!(!resolved.game_over);
}

#[tokio::test]
async fn unanimous_policy_moves_the_city() {
    let effects = EffectVector::new()
        .with(Dimension::Economy, 20)
        .with(Dimension::Welfare, -15);
    let state = state_with_catalog(uniform_catalog(30, effects)).await;
    let svc = service(&state);
    let room = started(&svc, 2).await;

    let policy = first_option(&svc, &room.room_id).await;
    svc.vote(&room.room_id, room.host(), &policy).await.unwrap();
    let receipt = svc.vote(&room.room_id, room.guest(1), &policy).await.unwrap();

    assert!(receipt.all_voted);
    assert_eq!(receipt.game_over, Some(false));
    let city = receipt.city_state.unwrap();
    assert_eq!(city.get(Dimension::Economy), 70);
    assert_eq!(city.get(Dimension::Welfare), 35);
    assert_eq!(city.get(Dimension::Security), 50);

    let view = svc.room_view(&room.room_id, None).await.unwrap();
    assert_eq!(view.status, RoomStatus::Result);
    assert!(!view.is_collapsed);
    assert_eq!(view.passed_policies.len(), 1);
    assert_eq!(view.passed_policies[0].id, policy);
    let result = view.last_result.unwrap();
    assert_eq!(result.actual_effects.get(Dimension::Economy), 20);
    assert_eq!(result.news_flash, format!("{policy} passes!"));
}

#[tokio::test]
async fn collapse_finishes_the_game_early() {
    let state = state_with_catalog(uniform_catalog(
        30,
        EffectVector::new().with(Dimension::Security, -35),
    ))
    .await;
    let svc = service(&state);
    let room = started(&svc, 2).await;

    vote_unanimously(&svc, &room).await;
    let view = svc.room_view(&room.room_id, None).await.unwrap();
    assert_eq!(view.city.get(Dimension::Security), 15);
    assert_eq!(view.status, RoomStatus::Result);

    svc.next_turn(&room.room_id).await.unwrap();
    vote_unanimously(&svc, &room).await;

    let view = svc.room_view(&room.room_id, None).await.unwrap();
    assert_eq!(view.turn, 2);
    assert_eq!(view.city.get(Dimension::Security), -20);
    assert!(view.is_collapsed);
    assert_eq!(view.status, RoomStatus::Finished);

    let err = svc.next_turn(&room.room_id).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::PhaseMismatch);
}

#[tokio::test]
async fn game_ends_after_the_last_turn() {
    let state = state_with_catalog(uniform_catalog(
        30,
        EffectVector::new().with(Dimension::Economy, 1),
    ))
    .await;
    let svc = service(&state);
    let room = started(&svc, 2).await;

    for turn in 1..=10u32 {
        let view = svc.room_view(&room.room_id, None).await.unwrap();
        assert_eq!(view.turn, turn);
        assert_eq!(view.status, RoomStatus::Voting);
        vote_unanimously(&svc, &room).await;
        if turn < 10 {
            let next = svc.next_turn(&room.room_id).await.unwrap();
            assert_eq!(next.status, RoomStatus::Voting);
            assert_eq!(next.turn, turn + 1);
        }
    }

    let view = svc.room_view(&room.room_id, None).await.unwrap();
    assert_eq!(view.status, RoomStatus::Finished);
    assert!(!view.is_collapsed);
    assert_eq!(view.city.get(Dimension::Economy), 60);
    assert_eq!(view.passed_policies.len(), 10);
}

#[tokio::test]
async fn next_turn_clears_ballots_and_deals() {
    let state = test_state(ScriptedReviewer::new()).await;
    let svc = service(&state);
    let room = started(&svc, 2).await;

    let err = svc.next_turn(&room.room_id).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::PhaseMismatch);

    let passed = vote_unanimously(&svc, &room).await;
    let before = svc.room_view(&room.room_id, None).await.unwrap();

    let next = svc.next_turn(&room.room_id).await.unwrap();
    assert_eq!(next.turn, 2);

    let view = svc.room_view(&room.room_id, Some(room.host())).await.unwrap();
    assert_eq!(view.status, RoomStatus::Voting);
    assert!(view.last_result.is_none());
    assert_eq!(view.current_options.len(), 3);
    assert_eq!(view.deck_remaining, before.deck_remaining - 3);
    assert!(view.current_options.iter().all(|o| o.id != passed));
    assert!(view.players.iter().all(|p| !p.has_voted));
    assert!(view.me.unwrap().current_vote.is_none());
}

#[tokio::test]
async fn exhausted_deck_finishes_on_next_turn() {
    let state = state_with_catalog(uniform_catalog(
        4,
        EffectVector::new().with(Dimension::Education, 2),
    ))
    .await;
    let svc = service(&state);
    let room = started(&svc, 2).await;

    vote_unanimously(&svc, &room).await;
    let next = svc.next_turn(&room.room_id).await.unwrap();
    assert_eq!(next.status, RoomStatus::Voting);

    let view = svc.room_view(&room.room_id, None).await.unwrap();
    assert_eq!(view.current_options.len(), 1);
    assert_eq!(view.deck_remaining, 0);

    vote_unanimously(&svc, &room).await;
    let next = svc.next_turn(&room.room_id).await.unwrap();
    assert_eq!(next.status, RoomStatus::Finished);
    assert_eq!(next.turn, 2);
}
