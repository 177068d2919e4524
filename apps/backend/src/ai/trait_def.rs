//! Petition reviewer trait definition.

use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;

use crate::domain::{CityState, MasterPolicy, PolicyDraft};
use crate::error::AppError;

/// Errors from the petition review backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiError {
    /// No reviewer is configured
    Disabled,
    /// The reviewer did not answer within its timeout
    Timeout,
    /// Network or HTTP-level failure
    Transport(String),
    /// Reply could not be interpreted as a verdict
    Malformed(String),
}

impl fmt::Display for AiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AiError::Disabled => write!(f, "petition reviewer is not configured"),
            AiError::Timeout => write!(f, "petition reviewer timed out"),
            AiError::Transport(msg) => write!(f, "petition reviewer request failed: {msg}"),
            AiError::Malformed(msg) => write!(f, "petition reviewer reply malformed: {msg}"),
        }
    }
}

impl std::error::Error for AiError {}

impl From<AiError> for AppError {
    fn from(err: AiError) -> Self {
        AppError::upstream(err.to_string())
    }
}

/// What the reviewer gets to see about the room.
#[derive(Debug, Clone, PartialEq)]
pub struct PetitionContext {
    pub text: String,
    pub city: CityState,
    /// Passed policies, oldest first
    pub passed: Vec<MasterPolicy>,
    /// Free-form hints for reviewer implementations that want more context
    pub extras: BTreeMap<String, String>,
}

impl PetitionContext {
    pub fn new(text: impl Into<String>, city: CityState, passed: Vec<MasterPolicy>) -> Self {
        Self {
            text: text.into(),
            city,
            passed,
            extras: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewOutcome {
    Approved(PolicyDraft),
    Rejected { reason: String },
}

/// Adjudicates free-text petitions.
///
/// Implementations may be slow and may fail; callers bound them with a
/// timeout and never retry.
#[async_trait]
pub trait PetitionReviewer: Send + Sync {
    async fn review(&self, ctx: &PetitionContext) -> Result<ReviewOutcome, AiError>;
}

/// Stand-in used when no reviewer credentials are configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableReviewer;

#[async_trait]
impl PetitionReviewer for UnavailableReviewer {
    async fn review(&self, _ctx: &PetitionContext) -> Result<ReviewOutcome, AiError> {
        Err(AiError::Disabled)
    }
}
