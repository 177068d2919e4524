use backend_test_support::unique_helpers::unique_user_id;
use polis_backend::ai::ScriptedReviewer;
use polis_backend::domain::RoomStatus;
use polis_backend::{ErrorCode, RoomService};
use serial_test::serial;

use crate::common::{service, sqlite_file_state, test_state};
use crate::support::factory::{first_option, lobby, started};

/// All guests cast the final ballots at once; every ballot is accepted and
/// the vote resolves exactly once.
async fn last_votes_race(svc: &RoomService, rooms: usize, players: usize) {
    for _ in 0..rooms {
        let room = started(svc, players).await;
        let policy = first_option(svc, &room.room_id).await;
        svc.vote(&room.room_id, room.host(), &policy).await.unwrap();

        let tasks: Vec<_> = room.users[1..]
            .iter()
            .map(|user| {
                let (svc, room_id, user, policy) = (
                    svc.clone(),
                    room.room_id.clone(),
                    user.clone(),
                    policy.clone(),
                );
                tokio::spawn(async move { svc.vote(&room_id, &user, &policy).await })
            })
            .collect();

        let mut resolved = 0;
        for task in tasks {
            let receipt = task.await.unwrap().unwrap();
            assert!(receipt.success);
            if receipt.resolved == Some(true) {
                resolved += 1;
            }
        }
        assert_eq!(resolved, 1);

        let view = svc.room_view(&room.room_id, None).await.unwrap();
        assert_eq!(view.status, RoomStatus::Result);
        assert_eq!(view.passed_policies.len(), 1);
        assert_eq!(view.last_result.unwrap().vote_details.len(), players);
    }
}

/// Six users rush a one-player lobby: exactly three get in.
async fn join_rush(svc: &RoomService) {
    let room = lobby(svc, 1).await.room_id;

    let tasks: Vec<_> = (0..6)
        .map(|i| {
            let (svc, room_id) = (svc.clone(), room.clone());
            tokio::spawn(async move {
                svc.join_room(&room_id, &unique_user_id(), &format!("Rush {i}"))
                    .await
            })
        })
        .collect();

    let mut joined = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => joined += 1,
            Err(err) => assert_eq!(err.code(), ErrorCode::RoomFull),
        }
    }
    assert_eq!(joined, 3);

    let view = svc.room_view(&room, None).await.unwrap();
    assert_eq!(view.players.len(), 4);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn simultaneous_last_votes_resolve_once() {
    let state = test_state(ScriptedReviewer::new()).await;
    last_votes_race(&service(&state), 5, 3).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_joins_respect_capacity() {
    let state = test_state(ScriptedReviewer::new()).await;
    join_rush(&service(&state)).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[serial]
async fn file_backed_sqlite_accepts_simultaneous_last_votes() {
    let dir = tempfile::tempdir().unwrap();
    let state = sqlite_file_state(&dir).await;
    last_votes_race(&service(&state), 10, 4).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[serial]
async fn file_backed_sqlite_join_rush_respects_capacity() {
    let dir = tempfile::tempdir().unwrap();
    let state = sqlite_file_state(&dir).await;
    join_rush(&service(&state)).await;
}
