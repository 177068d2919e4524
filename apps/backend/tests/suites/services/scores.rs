use polis_backend::ai::ScriptedReviewer;
use polis_backend::domain::{Dimension, EffectVector};
use polis_backend::ErrorCode;

use crate::common::{service, state_with_catalog, test_state};
use crate::support::factory::{started, uniform_catalog, vote_unanimously};

#[tokio::test]
async fn scores_wait_for_the_end() {
    let state = test_state(ScriptedReviewer::new()).await;
    let svc = service(&state);
    let room = started(&svc, 2).await;

    let err = svc.final_scores(&room.room_id).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::PhaseMismatch);
}

#[tokio::test]
async fn collapsed_city_is_scored_and_ranked() {
    // Economy soars, security falls: one collapse ends the game on turn 2
    let effects = EffectVector::new()
        .with(Dimension::Economy, 10)
        .with(Dimension::Security, -30);
    let state = state_with_catalog(uniform_catalog(30, effects)).await;
    let svc = service(&state);
    let room = started(&svc, 4).await;

    vote_unanimously(&svc, &room).await;
    svc.next_turn(&room.room_id).await.unwrap();
    vote_unanimously(&svc, &room).await;

    let board = svc.final_scores(&room.room_id).await.unwrap();
    assert!(board.is_collapsed);
    assert_eq!(board.final_city.get(Dimension::Economy), 70);
    assert_eq!(board.final_city.get(Dimension::Security), -10);
    assert_eq!(board.scores.len(), 4);

    // growth 2.0*70, care 2.0*50, green 1.5*50, order 1.0*-10
    let by_ideology = |id: &str| board.scores.iter().find(|s| s.ideology_id.as_deref() == Some(id));
    assert_eq!(by_ideology("growth").unwrap().score, 140);
    assert_eq!(by_ideology("care").unwrap().score, 100);
    assert_eq!(by_ideology("green").unwrap().score, 75);
    assert_eq!(by_ideology("order").unwrap().score, -10);

    let ranks: Vec<u32> = board.scores.iter().map(|s| s.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3, 4]);
    assert!(board.scores.windows(2).all(|w| w[0].score >= w[1].score));
}

#[tokio::test]
async fn ideologies_are_revealed_once_finished() {
    let state = state_with_catalog(uniform_catalog(
        30,
        EffectVector::new().with(Dimension::HumanRights, -60),
    ))
    .await;
    let svc = service(&state);
    let room = started(&svc, 2).await;

    let during = svc.room_view(&room.room_id, Some(room.host())).await.unwrap();
    assert!(during.players.iter().all(|p| p.ideology.is_none()));
    assert!(during.me.as_ref().and_then(|me| me.ideology.as_ref()).is_some());

    vote_unanimously(&svc, &room).await;

    let after = svc.room_view(&room.room_id, None).await.unwrap();
    assert!(after.is_collapsed);
    assert!(after.players.iter().all(|p| p.ideology.is_some()));
}
