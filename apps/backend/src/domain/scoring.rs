//! Ideology scoring and final standings.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::{Catalog, MasterIdeology};
use crate::domain::city::{CityState, Dimension};
use crate::domain::lifecycle::RoomAggregate;

/// Weighted sum of the city's dimensions, truncated toward zero.
pub fn ideology_score(ideology: &MasterIdeology, city: &CityState) -> i64 {
    let total: f64 = Dimension::ALL
        .iter()
        .map(|d| f64::from(city.get(*d)) * ideology.coefficients.get(*d))
        .sum();
    total.trunc() as i64
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerScore {
    pub user_id: String,
    pub display_name: String,
    pub ideology_id: Option<String>,
    pub ideology_name: Option<String>,
    pub score: i64,
    /// 1-based; tied scores share a rank and the next rank is skipped
    pub rank: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub scores: Vec<PlayerScore>,
    pub is_collapsed: bool,
    pub final_city: CityState,
}

/// Score every player against the room's current city. Players without a
/// resolvable ideology score zero.
pub fn final_standings(agg: &RoomAggregate, catalog: &Catalog) -> ScoreResult {
    let city = &agg.room.city;
    let mut scores: Vec<PlayerScore> = agg
        .players
        .iter()
        .map(|p| {
            let ideology = p.ideology_id.as_deref().and_then(|id| catalog.ideology(id));
            PlayerScore {
                user_id: p.user_id.clone(),
                display_name: p.display_name.clone(),
                ideology_id: p.ideology_id.clone(),
                ideology_name: ideology.map(|i| i.name.clone()),
                score: ideology.map_or(0, |i| ideology_score(i, city)),
                rank: 0,
            }
        })
        .collect();

    // stable: equal scores keep join order
    scores.sort_by(|a, b| b.score.cmp(&a.score));

    let mut prev: Option<i64> = None;
    let mut rank = 0;
    for (idx, entry) in scores.iter_mut().enumerate() {
        if prev != Some(entry.score) {
            rank = idx as u32 + 1;
            prev = Some(entry.score);
        }
        entry.rank = rank;
    }

    ScoreResult {
        scores,
        is_collapsed: agg.room.is_collapsed,
        final_city: *city,
    }
}
