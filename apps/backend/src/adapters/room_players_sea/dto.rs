//! DTOs for room_players_sea adapter.

/// New seat in a room.
#[derive(Debug, Clone)]
pub struct RoomPlayerCreate {
    pub room_id: String,
    pub user_id: String,
    pub display_name: String,
    pub is_host: bool,
    pub is_ready: bool,
    pub is_petition_used: bool,
    pub ideology_id: Option<String>,
    pub current_vote: Option<String>,
}

/// Mutable per-player flags, addressed by row id.
#[derive(Debug, Clone)]
pub struct RoomPlayerUpdate {
    pub id: i64,
    pub is_host: bool,
    pub is_ready: bool,
    pub is_petition_used: bool,
    pub current_vote: Option<String>,
}
