//! Turning a full set of ballots into a passed policy and a new city state.

use rand::Rng;

use crate::domain::catalog::Catalog;
use crate::domain::room::{Room, RoomStatus, VoteResult};
use crate::domain::tally::count_votes;
use crate::errors::domain::{DomainError, InfraErrorKind, ValidationKind};

/// Tally the room's ballots, apply the winning policy and move to RESULT, or
/// to FINISHED when this was the last turn or the city collapsed.
///
/// The caller checks status and completeness of the ballots first.
pub fn resolve_votes<R: Rng + ?Sized>(
    room: &mut Room,
    catalog: &Catalog,
    rng: &mut R,
) -> Result<VoteResult, DomainError> {
    let winner = count_votes(&room.votes, rng).ok_or_else(|| {
        DomainError::validation(ValidationKind::NotAllVoted, "no ballots to count")
    })?;

    let policy = room
        .resolve_policy(&winner, catalog)
        .cloned()
        .ok_or_else(|| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("voted policy '{winner}' is not in the catalog or room"),
            )
        })?;

    room.apply_effects(&policy.effects);
    room.passed_policy_ids.push(policy.id.clone());

    let vote_details = room
        .votes
        .iter()
        .filter_map(|(user, choice)| choice.as_ref().map(|c| (user.clone(), c.clone())))
        .collect();

    let result = VoteResult {
        passed_policy_id: policy.id,
        passed_policy_title: policy.title,
        actual_effects: policy.effects,
        news_flash: policy.news_flash,
        vote_details,
        flavor_image: None,
    };
    room.last_result = Some(result.clone());
    room.status = if room.is_game_over() {
        RoomStatus::Finished
    } else {
        RoomStatus::Result
    };
    Ok(result)
}
