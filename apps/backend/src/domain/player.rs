//! Room participants.

use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, ValidationKind};

pub const DISPLAY_NAME_MAX_CHARS: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub user_id: String,
    pub display_name: String,
    pub is_host: bool,
    pub is_ready: bool,
    pub is_petition_used: bool,
    /// Secret until the game finishes
    pub ideology_id: Option<String>,
    pub current_vote: Option<String>,
}

impl Player {
    pub fn new(
        user_id: impl Into<String>,
        display_name: impl Into<String>,
        ideology_id: Option<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: display_name.into(),
            is_host: false,
            is_ready: false,
            is_petition_used: false,
            ideology_id,
            current_vote: None,
        }
    }

    pub fn host(
        user_id: impl Into<String>,
        display_name: impl Into<String>,
        ideology_id: Option<String>,
    ) -> Self {
        Self {
            is_host: true,
            ..Self::new(user_id, display_name, ideology_id)
        }
    }
}

/// Trim and bound a display name; returns the cleaned value.
pub fn normalize_display_name(raw: &str) -> Result<String, DomainError> {
    let name = raw.trim();
    let len = name.chars().count();
    if len == 0 || len > DISPLAY_NAME_MAX_CHARS {
        return Err(DomainError::validation(
            ValidationKind::InvalidDisplayName,
            format!("display name must be 1 to {DISPLAY_NAME_MAX_CHARS} characters"),
        ));
    }
    Ok(name.to_string())
}
