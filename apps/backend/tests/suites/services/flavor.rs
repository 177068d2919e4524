use std::sync::atomic::Ordering;

use polis_backend::config::db::DbKind;
use polis_backend::infra::state::build_state;
use polis_backend::AppState;

use crate::common::{service, TEST_SEED};
use crate::support::factory::{first_option, started};
use crate::support::images;

async fn state_with_images(
    generator: std::sync::Arc<images::StubGenerator>,
    store: std::sync::Arc<images::MemoryStore>,
) -> AppState {
    build_state()
        .with_db(DbKind::SqliteMemory)
        .with_images(generator, store)
        .with_rng_seed(TEST_SEED)
        .build()
        .await
        .unwrap()
}

#[tokio::test]
async fn resolution_gets_a_flavor_image() {
    let (generator, store) = images::working();
    let state = state_with_images(generator.clone(), store).await;
    let svc = service(&state);
    let room = started(&svc, 2).await;
    let policy = first_option(&svc, &room.room_id).await;

    svc.vote(&room.room_id, room.host(), &policy).await.unwrap();
    let receipt = svc.vote(&room.room_id, room.guest(1), &policy).await.unwrap();

    let expected = format!("mem://{}/turn-1.png", room.room_id);
    let image = receipt.last_result.unwrap().flavor_image.unwrap();
    assert_eq!(image.url, expected);
    assert_eq!(generator.calls.load(Ordering::SeqCst), 1);

    let view = svc.room_view(&room.room_id, None).await.unwrap();
    let stored = view.last_result.unwrap().flavor_image.unwrap();
    assert_eq!(stored.url, expected);
}

#[tokio::test]
async fn image_failures_do_not_block_resolution() {
    let (generator, store) = images::broken();
    let state = state_with_images(generator.clone(), store).await;
    let svc = service(&state);
    let room = started(&svc, 2).await;
    let policy = first_option(&svc, &room.room_id).await;

    svc.vote(&room.room_id, room.host(), &policy).await.unwrap();
    let receipt = svc.vote(&room.room_id, room.guest(1), &policy).await.unwrap();

    assert_eq!(receipt.resolved, Some(true));
    let result = receipt.last_result.unwrap();
    assert_eq!(result.passed_policy_id, policy);
    assert!(result.flavor_image.is_none());
    assert_eq!(generator.calls.load(Ordering::SeqCst), 1);

    let view = svc.room_view(&room.room_id, None).await.unwrap();
    assert!(view.last_result.unwrap().flavor_image.is_none());
}

#[tokio::test]
async fn no_pipeline_means_no_image() {
    let state = build_state()
        .with_db(DbKind::SqliteMemory)
        .build()
        .await
        .unwrap();
    let svc = service(&state);
    let room = started(&svc, 2).await;
    let policy = first_option(&svc, &room.room_id).await;

    svc.vote(&room.room_id, room.host(), &policy).await.unwrap();
    let resolved = svc.vote(&room.room_id, room.guest(1), &policy).await.unwrap();
    assert!(resolved.last_result.unwrap().flavor_image.is_none());
}
