//! Deterministic reviewer that replays queued outcomes.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::ai::trait_def::{AiError, PetitionContext, PetitionReviewer, ReviewOutcome};

/// Returns queued outcomes in order; once the queue is empty every review
/// is rejected. Records the petitions it saw.
#[derive(Debug, Clone, Default)]
pub struct ScriptedReviewer {
    queue: Arc<Mutex<VecDeque<Result<ReviewOutcome, AiError>>>>,
    seen: Arc<Mutex<Vec<PetitionContext>>>,
}

impl ScriptedReviewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, outcome: Result<ReviewOutcome, AiError>) -> &Self {
        self.queue.lock().push_back(outcome);
        self
    }

    pub fn approve(&self, draft: crate::domain::PolicyDraft) -> &Self {
        self.push(Ok(ReviewOutcome::Approved(draft)))
    }

    pub fn reject(&self, reason: impl Into<String>) -> &Self {
        self.push(Ok(ReviewOutcome::Rejected {
            reason: reason.into(),
        }))
    }

    pub fn fail(&self, err: AiError) -> &Self {
        self.push(Err(err))
    }

    /// Petitions reviewed so far, oldest first.
    pub fn seen(&self) -> Vec<PetitionContext> {
        self.seen.lock().clone()
    }
}

#[async_trait]
impl PetitionReviewer for ScriptedReviewer {
    async fn review(&self, ctx: &PetitionContext) -> Result<ReviewOutcome, AiError> {
        self.seen.lock().push(ctx.clone());
        self.queue.lock().pop_front().unwrap_or_else(|| {
            Ok(ReviewOutcome::Rejected {
                reason: "No further petitions are being considered.".into(),
            })
        })
    }
}
