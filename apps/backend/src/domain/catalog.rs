//! Master policy and ideology catalog.
//!
//! The catalog is read-only during play. Rooms reference policies by id and
//! resolve them here, falling back to their own petition-generated entries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::city::{Dimension, EffectVector};
use crate::errors::domain::{DomainError, InfraErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolicyCategory {
    Economy,
    Welfare,
    Education,
    Environment,
    Security,
    HumanRights,
    /// Minted from an approved player petition
    Petition,
}

impl PolicyCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            PolicyCategory::Economy => "Economy",
            PolicyCategory::Welfare => "Welfare",
            PolicyCategory::Education => "Education",
            PolicyCategory::Environment => "Environment",
            PolicyCategory::Security => "Security",
            PolicyCategory::HumanRights => "HumanRights",
            PolicyCategory::Petition => "Petition",
        }
    }
}

impl fmt::Display for PolicyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Economy" => Ok(PolicyCategory::Economy),
            "Welfare" => Ok(PolicyCategory::Welfare),
            "Education" => Ok(PolicyCategory::Education),
            "Environment" => Ok(PolicyCategory::Environment),
            "Security" => Ok(PolicyCategory::Security),
            "HumanRights" => Ok(PolicyCategory::HumanRights),
            "Petition" => Ok(PolicyCategory::Petition),
            other => Err(DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("unknown policy category '{other}'"),
            )),
        }
    }
}

/// Full policy definition, effects included. Never sent to clients while
/// the policy is still an option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterPolicy {
    pub id: String,
    pub category: PolicyCategory,
    pub title: String,
    pub description: String,
    pub news_flash: String,
    pub effects: EffectVector,
}

/// Client-safe projection of a policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyOption {
    pub id: String,
    pub category: PolicyCategory,
    pub title: String,
    pub description: String,
}

impl From<&MasterPolicy> for PolicyOption {
    fn from(p: &MasterPolicy) -> Self {
        Self {
            id: p.id.clone(),
            category: p.category,
            title: p.title.clone(),
            description: p.description.clone(),
        }
    }
}

/// Policy content proposed by the reviewer for an approved petition,
/// before it has an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyDraft {
    pub title: String,
    pub description: String,
    pub news_flash: String,
    pub effects: EffectVector,
}

/// Per-dimension scoring weights. Missing keys weigh zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoefficientVector {
    pub economy: f64,
    pub welfare: f64,
    pub education: f64,
    pub environment: f64,
    pub security: f64,
    pub human_rights: f64,
}

impl CoefficientVector {
    pub fn get(&self, dim: Dimension) -> f64 {
        match dim {
            Dimension::Economy => self.economy,
            Dimension::Welfare => self.welfare,
            Dimension::Education => self.education,
            Dimension::Environment => self.environment,
            Dimension::Security => self.security,
            Dimension::HumanRights => self.human_rights,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterIdeology {
    pub id: String,
    pub name: String,
    pub description: String,
    pub coefficients: CoefficientVector,
}

/// Policies and ideologies in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub policies: Vec<MasterPolicy>,
    pub ideologies: Vec<MasterIdeology>,
}

impl Catalog {
    pub fn new(policies: Vec<MasterPolicy>, ideologies: Vec<MasterIdeology>) -> Self {
        Self {
            policies,
            ideologies,
        }
    }

    /// Built-in catalog seeded into empty databases.
    pub fn builtin() -> Result<Self, DomainError> {
        serde_json::from_str(include_str!("default_catalog.json")).map_err(|e| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("built-in catalog is malformed: {e}"),
            )
        })
    }

    pub fn policy(&self, id: &str) -> Option<&MasterPolicy> {
        self.policies.iter().find(|p| p.id == id)
    }

    pub fn ideology(&self, id: &str) -> Option<&MasterIdeology> {
        self.ideologies.iter().find(|i| i.id == id)
    }

    pub fn policy_ids(&self) -> Vec<String> {
        self.policies.iter().map(|p| p.id.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty() && self.ideologies.is_empty()
    }
}
