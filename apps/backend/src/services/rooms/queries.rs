use tracing::debug;

use crate::domain::scoring::{final_standings, ScoreResult};
use crate::domain::view::{room_view, RoomView};
use crate::domain::RoomStatus;
use crate::errors::domain::DomainError;
use crate::repos::rooms as rooms_repo;
use crate::services::rooms::RoomService;
use crate::AppError;

impl RoomService {
    /// The room as `viewer` may see it.
    pub async fn room_view(&self, room_id: &str, viewer: Option<&str>) -> Result<RoomView, AppError> {
        debug!(room_id, viewer, "Loading room view");
        let record = rooms_repo::require(&self.db, room_id).await?;
        Ok(room_view(&record.aggregate, &self.catalog, viewer)?)
    }

    /// Ranked ideology scores; only once the game is FINISHED.
    pub async fn final_scores(&self, room_id: &str) -> Result<ScoreResult, AppError> {
        debug!(room_id, "Loading final scores");
        let record = rooms_repo::require(&self.db, room_id).await?;
        let status = record.aggregate.room.status;
        if status != RoomStatus::Finished {
            return Err(DomainError::phase_mismatch(format!(
                "scores are available once the game is FINISHED, room is {status}"
            ))
            .into());
        }
        Ok(final_standings(&record.aggregate, &self.catalog))
    }
}
