//! DTOs for rooms_sea adapter.

use serde_json::Value as Json;

use crate::entities::rooms::RoomStatus;

/// Column values for a room row, JSON fields already encoded. Used for both
/// insert and the whole-row optimistic update.
#[derive(Debug, Clone)]
pub struct RoomWrite {
    pub id: String,
    pub host_id: String,
    pub status: RoomStatus,
    pub turn: i32,
    pub max_turns: i32,
    pub city: [i32; 6],
    pub is_collapsed: bool,
    pub current_policy_ids: Json,
    pub deck_ids: Json,
    pub passed_policy_ids: Json,
    pub votes: Json,
    pub last_result: Option<Json>,
    pub generated_policies: Json,
}

/// Sets the flavor image on an existing last result without touching the
/// rest of the row.
#[derive(Debug, Clone)]
pub struct RoomUpdateLastResult {
    pub id: String,
    pub current_lock_version: i32,
    pub last_result: Option<Json>,
}
