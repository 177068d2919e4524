//! Room aggregate root and its status machine.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::catalog::{Catalog, MasterPolicy, PolicyCategory, PolicyDraft};
use crate::domain::city::{CityState, EffectVector};
use crate::errors::domain::{DomainError, InfraErrorKind};

pub const MAX_TURNS: u32 = 10;
pub const GENERATED_POLICY_PREFIX: &str = "generated_";
const GENERATED_SUFFIX_LEN: usize = 8;
const GENERATED_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomStatus {
    Lobby,
    Voting,
    Result,
    Finished,
}

impl RoomStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            RoomStatus::Lobby => "LOBBY",
            RoomStatus::Voting => "VOTING",
            RoomStatus::Result => "RESULT",
            RoomStatus::Finished => "FINISHED",
        }
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOBBY" => Ok(RoomStatus::Lobby),
            "VOTING" => Ok(RoomStatus::Voting),
            "RESULT" => Ok(RoomStatus::Result),
            "FINISHED" => Ok(RoomStatus::Finished),
            other => Err(DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("unknown room status '{other}'"),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlavorImage {
    pub url: String,
}

/// Outcome of one resolved vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteResult {
    pub passed_policy_id: String,
    pub passed_policy_title: String,
    pub actual_effects: EffectVector,
    pub news_flash: String,
    /// user id -> policy id, as cast at resolution time
    pub vote_details: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flavor_image: Option<FlavorImage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    pub host_id: String,
    pub status: RoomStatus,
    pub turn: u32,
    pub max_turns: u32,
    pub city: CityState,
    pub is_collapsed: bool,
    pub current_policy_ids: Vec<String>,
    pub deck_ids: Vec<String>,
    pub passed_policy_ids: Vec<String>,
    /// user id -> chosen policy id; `None` until the player votes
    pub votes: BTreeMap<String, Option<String>>,
    pub last_result: Option<VoteResult>,
    pub generated_policies: BTreeMap<String, MasterPolicy>,
}

impl Room {
    pub fn new(id: impl Into<String>, host_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            host_id: host_id.into(),
            status: RoomStatus::Lobby,
            turn: 0,
            max_turns: MAX_TURNS,
            city: CityState::default(),
            is_collapsed: false,
            current_policy_ids: Vec::new(),
            deck_ids: Vec::new(),
            passed_policy_ids: Vec::new(),
            votes: BTreeMap::new(),
            last_result: None,
            generated_policies: BTreeMap::new(),
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.turn >= self.max_turns || self.is_collapsed
    }

    /// Apply effects to the city and refresh the collapse flag.
    pub fn apply_effects(&mut self, effects: &EffectVector) {
        self.city.apply(effects);
        self.is_collapsed = self.city.is_collapsed();
    }

    /// Room-generated policies shadow the master catalog.
    pub fn resolve_policy<'a>(&'a self, id: &str, catalog: &'a Catalog) -> Option<&'a MasterPolicy> {
        self.generated_policies
            .get(id)
            .or_else(|| catalog.policy(id))
    }

    /// Clear every ballot, keeping one empty entry per listed user.
    pub fn reset_votes<'a>(&mut self, user_ids: impl IntoIterator<Item = &'a str>) {
        self.votes = user_ids
            .into_iter()
            .map(|id| (id.to_string(), None))
            .collect();
    }

    /// Store a petition-born policy under a fresh `generated_` id.
    pub fn mint_generated_policy<R: Rng + ?Sized>(
        &mut self,
        draft: PolicyDraft,
        catalog: &Catalog,
        rng: &mut R,
    ) -> String {
        let id = loop {
            let candidate = generated_policy_id(rng);
            if !self.generated_policies.contains_key(&candidate)
                && catalog.policy(&candidate).is_none()
            {
                break candidate;
            }
        };
        let policy = MasterPolicy {
            id: id.clone(),
            category: PolicyCategory::Petition,
            title: draft.title,
            description: draft.description,
            news_flash: draft.news_flash,
            effects: draft.effects,
        };
        self.generated_policies.insert(id.clone(), policy);
        id
    }
}

fn generated_policy_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    let suffix: String = (0..GENERATED_SUFFIX_LEN)
        .map(|_| {
            let idx = rng.random_range(0..GENERATED_ALPHABET.len());
            char::from(GENERATED_ALPHABET[idx])
        })
        .collect();
    format!("{GENERATED_POLICY_PREFIX}{suffix}")
}
