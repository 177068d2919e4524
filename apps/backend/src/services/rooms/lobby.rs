use std::sync::Arc;

use tracing::{debug, info};
use ulid::Ulid;

use crate::db::txn::{with_txn, with_txn_retry};
use crate::domain::lifecycle::{self, LeaveOutcome};
use crate::domain::RoomStatus;
use crate::repos::rooms as rooms_repo;
use crate::services::rooms::{
    CreateRoomResponse, JoinRoomResponse, LeaveRoomResponse, RoomService, StartGameResponse,
    ToggleReadyResponse,
};
use crate::AppError;

impl RoomService {
    pub async fn create_room(
        &self,
        user_id: &str,
        display_name: &str,
    ) -> Result<CreateRoomResponse, AppError> {
        let room_id = Ulid::new().to_string();
        debug!(room_id = %room_id, user_id, "Creating room");

        let aggregate = {
            let mut rng = self.rng.rng();
            lifecycle::create_room(&room_id, user_id, display_name, &self.catalog, &mut rng)?
        };

        let record = with_txn(&self.db, move |txn| {
            Box::pin(async move { Ok(rooms_repo::insert(txn, &aggregate).await?) })
        })
        .await?;

        info!(room_id = %room_id, host_id = user_id, "Room created");
        Ok(CreateRoomResponse {
            room_id: record.room_id().to_string(),
            player_id: user_id.to_string(),
            status: record.aggregate.room.status,
        })
    }

    pub async fn join_room(
        &self,
        room_id: &str,
        user_id: &str,
        display_name: &str,
    ) -> Result<JoinRoomResponse, AppError> {
        debug!(room_id, user_id, "Joining room");
        let catalog = Arc::clone(&self.catalog);
        let (uid, name) = (user_id.to_string(), display_name.to_string());

        let result = self
            .run_mutation(room_id, move |agg, rng| {
                lifecycle::join(agg, &uid, &name, &catalog, rng)
            })
            .await?;

        info!(
            room_id,
            user_id,
            players = result.record.aggregate.players.len(),
            "Player joined"
        );
        Ok(JoinRoomResponse {
            player_id: user_id.to_string(),
        })
    }

    /// Remove the caller. The last player out deletes the room; a departing
    /// host hands the role to the earliest remaining joiner.
    pub async fn leave_room(
        &self,
        room_id: &str,
        user_id: &str,
    ) -> Result<LeaveRoomResponse, AppError> {
        debug!(room_id, user_id, "Leaving room");
        let (rid, uid) = (room_id.to_string(), user_id.to_string());

        let outcome = with_txn_retry(&self.db, move |txn| {
            let (rid, uid) = (rid.clone(), uid.clone());
            Box::pin(async move {
                let mut record = rooms_repo::lock(txn, &rid).await?;
                let outcome = lifecycle::leave(&mut record.aggregate, &uid)?;
                match outcome {
                    LeaveOutcome::RoomEmptied => rooms_repo::delete(txn, &rid).await?,
                    LeaveOutcome::Remaining => {
                        rooms_repo::save(txn, &record).await?;
                    }
                }
                Ok(outcome)
            })
        })
        .await?;

        let room_deleted = outcome == LeaveOutcome::RoomEmptied;
        if room_deleted {
            info!(room_id, "Last player left, room deleted");
        } else {
            info!(room_id, user_id, "Player left");
        }
        Ok(LeaveRoomResponse { room_deleted })
    }

    pub async fn toggle_ready(
        &self,
        room_id: &str,
        user_id: &str,
    ) -> Result<ToggleReadyResponse, AppError> {
        debug!(room_id, user_id, "Toggling ready");
        let uid = user_id.to_string();

        let result = self
            .run_mutation(room_id, move |agg, _rng| lifecycle::toggle_ready(agg, &uid))
            .await?;

        debug!(room_id, user_id, is_ready = result.output, "Ready toggled");
        Ok(ToggleReadyResponse {
            is_ready: result.output,
        })
    }

    /// Host-only: shuffle the deck, deal the first hand and enter VOTING.
    pub async fn start_game(
        &self,
        room_id: &str,
        user_id: &str,
    ) -> Result<StartGameResponse, AppError> {
        debug!(room_id, user_id, "Starting game");
        let catalog = Arc::clone(&self.catalog);
        let uid = user_id.to_string();

        let result = self
            .run_mutation(room_id, move |agg, rng| {
                lifecycle::start(agg, &uid, &catalog, rng)
            })
            .await?;

        let room = &result.record.aggregate.room;
        debug_assert_eq!(room.status, RoomStatus::Voting);
        info!(
            room_id,
            turn = room.turn,
            deck = room.deck_ids.len(),
            "Game started"
        );
        Ok(StartGameResponse {
            status: room.status,
            turn: room.turn,
            current_policy_ids: room.current_policy_ids.clone(),
        })
    }
}
