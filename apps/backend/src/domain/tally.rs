//! Plurality vote counting with uniform random tie-break.

use std::collections::BTreeMap;

use rand::Rng;

/// Policy ids sharing the highest vote count, in id order. Empty ballots are
/// ignored; an empty result means nobody voted.
pub fn leading_candidates(votes: &BTreeMap<String, Option<String>>) -> Vec<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for choice in votes.values().flatten() {
        *counts.entry(choice.as_str()).or_insert(0) += 1;
    }
    let Some(max) = counts.values().copied().max() else {
        return Vec::new();
    };
    counts
        .into_iter()
        .filter(|(_, c)| *c == max)
        .map(|(id, _)| id.to_string())
        .collect()
}

/// Winning policy id, or `None` when no ballot was cast.
pub fn count_votes<R: Rng + ?Sized>(
    votes: &BTreeMap<String, Option<String>>,
    rng: &mut R,
) -> Option<String> {
    let mut leaders = leading_candidates(votes);
    match leaders.len() {
        0 => None,
        1 => leaders.pop(),
        n => {
            let pick = rng.random_range(0..n);
            Some(leaders.swap_remove(pick))
        }
    }
}
