use crate::domain::catalog::{PolicyCategory, PolicyDraft};
use crate::domain::city::{Dimension, EffectVector};
use crate::domain::lifecycle::{self, PETITION_MAX_CHARS};
use crate::domain::room::{RoomStatus, GENERATED_POLICY_PREFIX};
use crate::domain::test_room_helpers::{catalog, lobby_with, rng, voting_with};
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};

fn draft() -> PolicyDraft {
    PolicyDraft {
        title: "Night buses".into(),
        description: "Run buses all night".into(),
        news_flash: "Night owls rejoice".into(),
        effects: EffectVector::new()
            .with(Dimension::Welfare, 5)
            .with(Dimension::Economy, -5),
    }
}

#[test]
fn petition_text_is_bounded() {
    assert!(lifecycle::normalize_petition_text("").is_err());
    assert!(lifecycle::normalize_petition_text("   ").is_err());
    assert_eq!(
        lifecycle::normalize_petition_text("  more trees ").unwrap(),
        "more trees"
    );
    let long = "a".repeat(PETITION_MAX_CHARS + 1);
    assert!(matches!(
        lifecycle::normalize_petition_text(&long).unwrap_err(),
        DomainError::Validation(ValidationKind::InvalidPetition, _)
    ));
}

#[test]
fn petitions_only_during_voting() {
    let agg = lobby_with(2);
    assert!(matches!(
        lifecycle::check_petition(&agg, "u2").unwrap_err(),
        DomainError::Validation(ValidationKind::PhaseMismatch, _)
    ));
    let agg = voting_with(2);
    assert!(lifecycle::check_petition(&agg, "u2").is_ok());
    assert!(matches!(
        lifecycle::check_petition(&agg, "stranger").unwrap_err(),
        DomainError::Conflict(ConflictKind::NotInRoom, _)
    ));
}

#[test]
fn accepted_petition_goes_to_the_bottom_of_the_deck() {
    let catalog = catalog();
    let mut agg = voting_with(2);
    let deck_before = agg.room.deck_ids.len();

    let id = lifecycle::accept_petition(&mut agg, "u2", draft(), &catalog, &mut rng(3)).unwrap();

    assert!(id.starts_with(GENERATED_POLICY_PREFIX));
    assert_eq!(agg.room.deck_ids.len(), deck_before + 1);
    assert_eq!(agg.room.deck_ids.last(), Some(&id));
    assert_eq!(
        agg.room.generated_policies[&id].category,
        PolicyCategory::Petition
    );
    assert!(agg.player("u2").unwrap().is_petition_used);
    assert!(!agg.player("u1").unwrap().is_petition_used);
}

#[test]
fn second_petition_is_rejected() {
    let catalog = catalog();
    let mut agg = voting_with(2);
    lifecycle::accept_petition(&mut agg, "u2", draft(), &catalog, &mut rng(3)).unwrap();

    assert!(matches!(
        lifecycle::check_petition(&agg, "u2").unwrap_err(),
        DomainError::Conflict(ConflictKind::PetitionUsed, _)
    ));
    assert!(matches!(
        lifecycle::accept_petition(&mut agg, "u2", draft(), &catalog, &mut rng(4)).unwrap_err(),
        DomainError::Conflict(ConflictKind::PetitionUsed, _)
    ));
}

#[test]
fn approval_arriving_after_the_game_ended_is_dropped() {
    let catalog = catalog();
    let mut agg = voting_with(2);
    agg.room.status = RoomStatus::Finished;
    let deck_before = agg.room.deck_ids.clone();
    assert!(lifecycle::accept_petition(&mut agg, "u2", draft(), &catalog, &mut rng(3)).is_err());
    assert_eq!(agg.room.deck_ids, deck_before);
    assert!(!agg.player("u2").unwrap().is_petition_used);
}
