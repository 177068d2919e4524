//! Reply bodies of the room operations (camelCase on the wire).

use serde::Serialize;

use crate::domain::{CityState, RoomStatus, VoteResult};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomResponse {
    pub room_id: String,
    pub player_id: String,
    pub status: RoomStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRoomResponse {
    pub player_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRoomResponse {
    /// The caller was the last player and the room is gone
    pub room_deleted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleReadyResponse {
    pub is_ready: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartGameResponse {
    pub status: RoomStatus,
    pub turn: u32,
    pub current_policy_ids: Vec<String>,
}

/// Ballot receipt. The resolution fields are present only when this
/// ballot was the last one and the vote resolved in the same request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteResponse {
    pub success: bool,
    pub all_voted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_result: Option<VoteResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city_state: Option<CityState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_over: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveResponse {
    pub status: RoomStatus,
    pub last_result: VoteResult,
    pub city_state: CityState,
    pub game_over: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextTurnResponse {
    pub status: RoomStatus,
    pub turn: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PetitionResponse {
    pub approved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_id: Option<String>,
    pub message: String,
}
