//! Room fixtures driven through the public service API.

use backend_test_support::unique_helpers::unique_user_id;
use polis_backend::domain::catalog::CoefficientVector;
use polis_backend::domain::{
    Catalog, Dimension, EffectVector, MasterIdeology, MasterPolicy, PolicyCategory,
};
use polis_backend::RoomService;

/// A room plus the user ids seated in it, host first.
pub struct RoomFixture {
    pub room_id: String,
    pub users: Vec<String>,
}

impl RoomFixture {
    pub fn host(&self) -> &str {
        &self.users[0]
    }

    pub fn guest(&self, n: usize) -> &str {
        &self.users[n]
    }
}

/// LOBBY room hosted by a fresh user with `players - 1` guests, none ready.
pub async fn lobby(service: &RoomService, players: usize) -> RoomFixture {
    let host = unique_user_id();
    let created = service
        .create_room(&host, "Host")
        .await
        .expect("create room");
    let mut users = vec![host];
    for i in 1..players {
        let guest = unique_user_id();
        service
            .join_room(&created.room_id, &guest, &format!("Guest {i}"))
            .await
            .expect("join room");
        users.push(guest);
    }
    RoomFixture {
        room_id: created.room_id,
        users,
    }
}

/// Room in VOTING on turn 1.
pub async fn started(service: &RoomService, players: usize) -> RoomFixture {
    let fixture = lobby(service, players).await;
    for guest in &fixture.users[1..] {
        service
            .toggle_ready(&fixture.room_id, guest)
            .await
            .expect("ready");
    }
    service
        .start_game(&fixture.room_id, fixture.host())
        .await
        .expect("start game");
    fixture
}

/// The current hand's first option.
pub async fn first_option(service: &RoomService, room_id: &str) -> String {
    let view = service.room_view(room_id, None).await.expect("room view");
    view.current_options[0].id.clone()
}

/// Every player votes for the first option; the last ballot resolves.
pub async fn vote_unanimously(service: &RoomService, fixture: &RoomFixture) -> String {
    let policy_id = first_option(service, &fixture.room_id).await;
    for user in &fixture.users {
        service
            .vote(&fixture.room_id, user, &policy_id)
            .await
            .expect("vote");
    }
    policy_id
}

pub fn policy(id: &str, effects: EffectVector) -> MasterPolicy {
    MasterPolicy {
        id: id.to_string(),
        category: PolicyCategory::Economy,
        title: format!("Policy {id}"),
        description: format!("Description of {id}"),
        news_flash: format!("{id} passes!"),
        effects,
    }
}

fn weight_on(dim: Dimension, weight: f64) -> CoefficientVector {
    let mut c = CoefficientVector::default();
    match dim {
        Dimension::Economy => c.economy = weight,
        Dimension::Welfare => c.welfare = weight,
        Dimension::Education => c.education = weight,
        Dimension::Environment => c.environment = weight,
        Dimension::Security => c.security = weight,
        Dimension::HumanRights => c.human_rights = weight,
    }
    c
}

pub fn ideology(id: &str, dim: Dimension, weight: f64) -> MasterIdeology {
    MasterIdeology {
        id: id.to_string(),
        name: format!("Ideology {id}"),
        description: String::new(),
        coefficients: weight_on(dim, weight),
    }
}

/// `count` policies that all apply `effects`, with four ideologies.
pub fn uniform_catalog(count: usize, effects: EffectVector) -> Catalog {
    let policies = (1..=count)
        .map(|n| policy(&format!("p{n:02}"), effects.clone()))
        .collect();
    let ideologies = vec![
        ideology("growth", Dimension::Economy, 2.0),
        ideology("care", Dimension::Welfare, 2.0),
        ideology("order", Dimension::Security, 1.0),
        ideology("green", Dimension::Environment, 1.5),
    ];
    Catalog::new(policies, ideologies)
}
