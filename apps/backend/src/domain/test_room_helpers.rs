//! Test-only builders for room aggregates in domain unit tests.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::catalog::Catalog;
use crate::domain::lifecycle::{self, RoomAggregate};

pub fn catalog() -> Catalog {
    Catalog::builtin().expect("built-in catalog parses")
}

pub fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

pub fn user(n: usize) -> String {
    format!("u{n}")
}

/// LOBBY room hosted by `u1` with players `u2..=u{n}`, none ready.
pub fn lobby_with(n: usize) -> RoomAggregate {
    let catalog = catalog();
    let mut rng = rng(11);
    let mut agg =
        lifecycle::create_room("room-1", &user(1), "Player 1", &catalog, &mut rng).unwrap();
    for i in 2..=n {
        lifecycle::join(&mut agg, &user(i), &format!("Player {i}"), &catalog, &mut rng).unwrap();
    }
    agg
}

/// Started room (VOTING, turn 1) with `n` players.
pub fn voting_with(n: usize) -> RoomAggregate {
    let catalog = catalog();
    let mut agg = lobby_with(n);
    for i in 2..=n {
        lifecycle::toggle_ready(&mut agg, &user(i)).unwrap();
    }
    lifecycle::start(&mut agg, &user(1), &catalog, &mut rng(23)).unwrap();
    agg
}

/// Every player votes for `policy_id`.
pub fn everyone_votes(agg: &mut RoomAggregate, policy_id: &str) {
    let ids: Vec<String> = agg.players.iter().map(|p| p.user_id.clone()).collect();
    for id in ids {
        lifecycle::vote(agg, &id, policy_id).unwrap();
    }
}
