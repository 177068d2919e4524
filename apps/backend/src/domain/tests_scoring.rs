use crate::domain::catalog::{CoefficientVector, MasterIdeology};
use crate::domain::city::CityState;
use crate::domain::scoring::{final_standings, ideology_score};
use crate::domain::test_room_helpers::{catalog, lobby_with};

fn ideology(coefficients: CoefficientVector) -> MasterIdeology {
    MasterIdeology {
        id: "test".into(),
        name: "Test".into(),
        description: String::new(),
        coefficients,
    }
}

#[test]
fn score_is_weighted_sum() {
    let mut city = CityState::default();
    city.economy = 60;
    let only_economy = ideology(CoefficientVector {
        economy: 2.0,
        ..Default::default()
    });
    assert_eq!(ideology_score(&only_economy, &city), 120);
}

#[test]
fn fractional_scores_truncate_toward_zero() {
    let city = CityState::uniform(51);
    let halves = ideology(CoefficientVector {
        economy: 0.5,
        ..Default::default()
    });
    assert_eq!(ideology_score(&halves, &city), 25);

    let negative = ideology(CoefficientVector {
        economy: -0.5,
        ..Default::default()
    });
    assert_eq!(ideology_score(&negative, &city), -25);
}

#[test]
fn starting_city_scores_every_builtin_ideology_equally() {
    let catalog = catalog();
    let city = CityState::default();
    for i in &catalog.ideologies {
        assert_eq!(ideology_score(i, &city), 175, "{}", i.id);
    }
}

#[test]
fn ties_share_a_rank_and_skip_the_next() {
    let catalog = catalog();
    let agg = lobby_with(3);
    // untouched city: every balanced ideology scores 175
    let standings = final_standings(&agg, &catalog);
    assert_eq!(standings.scores.len(), 3);
    assert!(standings.scores.iter().all(|s| s.rank == 1));
    assert_eq!(standings.final_city, CityState::default());
    assert!(!standings.is_collapsed);
}

#[test]
fn standings_sorted_by_score_with_competition_ranks() {
    let catalog = catalog();
    let mut agg = lobby_with(3);
    agg.players[0].ideology_id = Some("capitalist".into());
    agg.players[1].ideology_id = Some("socialist".into());
    agg.players[2].ideology_id = None;
    agg.room.city.economy = 90;

    let standings = final_standings(&agg, &catalog);
    let order: Vec<_> = standings.scores.iter().map(|s| s.user_id.as_str()).collect();
    assert_eq!(order, vec!["u1", "u2", "u3"]);
    // capitalist: 175 + 40*2.0 ; socialist: 175 - 40*0.5
    assert_eq!(standings.scores[0].score, 255);
    assert_eq!(standings.scores[1].score, 155);
    assert_eq!(standings.scores[2].score, 0);
    assert_eq!(
        standings.scores.iter().map(|s| s.rank).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert_eq!(standings.scores[0].ideology_name.as_deref(), Some("Capitalist"));
}
