use std::sync::Arc;

use tracing::{debug, info};

use crate::ai::{AiError, PetitionContext, ReviewOutcome};
use crate::domain::lifecycle;
use crate::domain::MasterPolicy;
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::repos::rooms as rooms_repo;
use crate::services::rooms::{PetitionResponse, RoomService};
use crate::AppError;

impl RoomService {
    /// Submit a citizen petition for review.
    ///
    /// The review runs outside any transaction: guards are checked on a
    /// plain read, the reviewer is awaited with a timeout, and an approval
    /// is written by a separate mutation that checks membership and the
    /// unused flag again. A rejection leaves the room untouched and the
    /// petition still available.
    pub async fn submit_petition(
        &self,
        room_id: &str,
        user_id: &str,
        text: &str,
    ) -> Result<PetitionResponse, AppError> {
        debug!(room_id, user_id, "Petition submitted");

        let record = rooms_repo::require(&self.db, room_id).await?;
        lifecycle::check_petition(&record.aggregate, user_id)?;
        let text = lifecycle::normalize_petition_text(text)?;

        let room = &record.aggregate.room;
        let passed = room
            .passed_policy_ids
            .iter()
            .map(|id| {
                room.resolve_policy(id, &self.catalog)
                    .cloned()
                    .ok_or_else(|| {
                        DomainError::infra(
                            InfraErrorKind::DataCorruption,
                            format!("passed policy '{id}' resolves nowhere"),
                        )
                    })
            })
            .collect::<Result<Vec<MasterPolicy>, _>>()?;
        let mut context = PetitionContext::new(text, room.city, passed);
        context
            .extras
            .insert("turn".into(), format!("{} of {}", room.turn, room.max_turns));

        let outcome = tokio::time::timeout(self.review_timeout, self.reviewer.review(&context))
            .await
            .map_err(|_| AiError::Timeout)??;

        let draft = match outcome {
            ReviewOutcome::Rejected { reason } => {
                info!(room_id, user_id, "Petition rejected");
                return Ok(PetitionResponse {
                    approved: false,
                    policy_id: None,
                    message: reason,
                });
            }
            ReviewOutcome::Approved(draft) => draft,
        };

        let title = draft.title.clone();
        let catalog = Arc::clone(&self.catalog);
        let uid = user_id.to_string();
        let result = self
            .run_mutation(room_id, move |agg, rng| {
                lifecycle::accept_petition(agg, &uid, draft.clone(), &catalog, rng)
            })
            .await?;

        info!(room_id, user_id, policy_id = %result.output, "Petition approved");
        Ok(PetitionResponse {
            approved: true,
            message: format!("Petition approved: \"{title}\" joins the bottom of the deck"),
            policy_id: Some(result.output),
        })
    }
}
