//! City state: six bounded-feeling dimensions and effect application.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Every dimension starts here when a room is created.
pub const INITIAL_DIMENSION_VALUE: i32 = 50;

/// One axis of the simulated city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    Economy,
    Welfare,
    Education,
    Environment,
    Security,
    HumanRights,
}

impl Dimension {
    pub const ALL: [Dimension; 6] = [
        Dimension::Economy,
        Dimension::Welfare,
        Dimension::Education,
        Dimension::Environment,
        Dimension::Security,
        Dimension::HumanRights,
    ];

    /// Wire name, as used in effect and coefficient maps.
    pub const fn as_str(self) -> &'static str {
        match self {
            Dimension::Economy => "economy",
            Dimension::Welfare => "welfare",
            Dimension::Education => "education",
            Dimension::Environment => "environment",
            Dimension::Security => "security",
            Dimension::HumanRights => "humanRights",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current values of the six dimensions. Unbounded above; a value at or
/// below zero means the city has collapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityState {
    pub economy: i32,
    pub welfare: i32,
    pub education: i32,
    pub environment: i32,
    pub security: i32,
    pub human_rights: i32,
}

impl Default for CityState {
    fn default() -> Self {
        Self::uniform(INITIAL_DIMENSION_VALUE)
    }
}

impl CityState {
    pub fn uniform(value: i32) -> Self {
        Self {
            economy: value,
            welfare: value,
            education: value,
            environment: value,
            security: value,
            human_rights: value,
        }
    }

    pub fn get(&self, dim: Dimension) -> i32 {
        match dim {
            Dimension::Economy => self.economy,
            Dimension::Welfare => self.welfare,
            Dimension::Education => self.education,
            Dimension::Environment => self.environment,
            Dimension::Security => self.security,
            Dimension::HumanRights => self.human_rights,
        }
    }

    fn slot_mut(&mut self, dim: Dimension) -> &mut i32 {
        match dim {
            Dimension::Economy => &mut self.economy,
            Dimension::Welfare => &mut self.welfare,
            Dimension::Education => &mut self.education,
            Dimension::Environment => &mut self.environment,
            Dimension::Security => &mut self.security,
            Dimension::HumanRights => &mut self.human_rights,
        }
    }

    pub fn set(&mut self, dim: Dimension, value: i32) {
        *self.slot_mut(dim) = value;
    }

    /// Add each delta to its dimension. Missing dimensions are untouched.
    pub fn apply(&mut self, effects: &EffectVector) {
        for (dim, delta) in effects.iter() {
            let slot = self.slot_mut(dim);
            *slot = slot.saturating_add(delta);
        }
    }

    pub fn is_collapsed(&self) -> bool {
        Dimension::ALL.iter().any(|d| self.get(*d) <= 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dimension, i32)> + '_ {
        Dimension::ALL.iter().map(move |d| (*d, self.get(*d)))
    }
}

/// Signed per-dimension deltas. Absent dimensions count as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffectVector(BTreeMap<Dimension, i32>);

impl EffectVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for fixtures and catalogs.
    pub fn with(mut self, dim: Dimension, delta: i32) -> Self {
        self.0.insert(dim, delta);
        self
    }

    pub fn get(&self, dim: Dimension) -> i32 {
        self.0.get(&dim).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dimension, i32)> + '_ {
        self.0.iter().map(|(d, v)| (*d, *v))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Dimension, i32)> for EffectVector {
    fn from_iter<I: IntoIterator<Item = (Dimension, i32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
