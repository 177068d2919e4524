use tracing::{debug, info, warn};

use crate::db::txn::with_txn;
use crate::domain::{FlavorImage, MasterPolicy, RoomStatus, VoteResult};
use crate::repos::rooms::{self as rooms_repo, RoomRecord};
use crate::services::rooms::RoomService;
use crate::state::app_state::FlavorImages;
use crate::AppError;

impl RoomService {
    /// Render and store an image for a freshly committed resolution, then
    /// attach it to the room's last result.
    ///
    /// Never fails: without an image pipeline, or when any step errors, the
    /// result is returned as it was.
    pub(super) async fn attach_flavor_image(
        &self,
        record: &RoomRecord,
        result: VoteResult,
    ) -> VoteResult {
        let Some(images) = &self.images else {
            return result;
        };
        let room_id = record.room_id();
        let turn = record.aggregate.room.turn;

        let url = match self.render_image(images, record).await {
            Ok(url) => url,
            Err(err) => {
                warn!(room_id, turn, error = %err, "Flavor image skipped");
                return result;
            }
        };

        let mut with_image = result.clone();
        with_image.flavor_image = Some(FlavorImage { url });
        match self.store_flavor_image(room_id, turn, &with_image).await {
            Ok(true) => {
                info!(room_id, turn, "Flavor image attached");
                with_image
            }
            Ok(false) => {
                debug!(room_id, turn, "Room moved on before the flavor image was ready");
                result
            }
            Err(err) => {
                warn!(room_id, turn, error = %err, "Failed to attach flavor image");
                result
            }
        }
    }

    async fn render_image(
        &self,
        images: &FlavorImages,
        record: &RoomRecord,
    ) -> Result<String, AppError> {
        let room = &record.aggregate.room;
        let passed: Vec<MasterPolicy> = room
            .passed_policy_ids
            .iter()
            .filter_map(|id| room.resolve_policy(id, &self.catalog).cloned())
            .collect();

        let bytes = images
            .generator
            .generate(&room.city, &passed)
            .await
            .map_err(|e| AppError::upstream(e.to_string()))?;
        images
            .store
            .upload(&room.id, room.turn, bytes)
            .await
            .map_err(|e| AppError::upstream(e.to_string()))
    }

    /// Write the image-bearing result if the room still shows the same
    /// resolution. Returns whether it was written.
    async fn store_flavor_image(
        &self,
        room_id: &str,
        turn: u32,
        result: &VoteResult,
    ) -> Result<bool, AppError> {
        let room_id = room_id.to_string();
        let result = result.clone();
        with_txn(&self.db, move |txn| {
            Box::pin(async move {
                let Some(current) = rooms_repo::find(txn, &room_id).await? else {
                    return Ok(false);
                };
                let room = &current.aggregate.room;
                let same_resolution = matches!(room.status, RoomStatus::Result | RoomStatus::Finished)
                    && room.turn == turn
                    && room
                        .last_result
                        .as_ref()
                        .is_some_and(|r| r.passed_policy_id == result.passed_policy_id);
                if !same_resolution {
                    return Ok(false);
                }
                rooms_repo::update_last_result(txn, &room_id, current.lock_version, &result)
                    .await?;
                Ok(true)
            })
        })
        .await
    }
}
