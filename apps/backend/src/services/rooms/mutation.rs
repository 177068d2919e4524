use std::sync::Arc;

use rand_chacha::ChaCha8Rng;

use crate::db::txn::with_txn_retry;
use crate::domain::RoomAggregate;
use crate::errors::domain::DomainError;
use crate::repos::rooms::{self as rooms_repo, RoomRecord};
use crate::services::rooms::RoomService;
use crate::AppError;

/// Outcome of one committed read-modify-write cycle.
#[derive(Debug)]
pub struct RoomMutation<T> {
    /// Value returned by the transition
    pub output: T,
    /// The room as persisted, with its new lock version
    pub record: RoomRecord,
    pub old_version: i32,
}

impl RoomService {
    /// Lock the room, apply `transition` and save, all in one transaction.
    ///
    /// The whole cycle is rerun on an optimistic-lock conflict, so
    /// `transition` must be repeatable. Each attempt gets a fresh RNG.
    pub async fn run_mutation<T, F>(
        &self,
        room_id: &str,
        transition: F,
    ) -> Result<RoomMutation<T>, AppError>
    where
        T: Send + 'static,
        F: Fn(&mut RoomAggregate, &mut ChaCha8Rng) -> Result<T, DomainError> + Send + Sync + 'static,
    {
        let transition = Arc::new(transition);
        let room_id = room_id.to_string();
        let rng_source = self.rng.clone();

        with_txn_retry(&self.db, move |txn| {
            let transition = Arc::clone(&transition);
            let room_id = room_id.clone();
            let mut rng = rng_source.rng();
            Box::pin(async move {
                let mut record = rooms_repo::lock(txn, &room_id).await?;
                let old_version = record.lock_version;
                let output = transition(&mut record.aggregate, &mut rng)?;
                let record = rooms_repo::save(txn, &record).await?;
                Ok(RoomMutation {
                    output,
                    record,
                    old_version,
                })
            })
        })
        .await
    }
}
