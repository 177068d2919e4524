//! Room orchestration: loads the aggregate, applies a lifecycle
//! transition and persists the result inside one transaction.
//!
//! Collaborators (catalog, reviewer, image pipeline, RNG) are taken from
//! [`AppState`] once per request.

mod flavor;
mod lobby;
mod mutation;
mod petitions;
mod queries;
mod responses;
mod voting;

use std::sync::Arc;
use std::time::Duration;

use sea_orm::DatabaseConnection;

use crate::ai::PetitionReviewer;
use crate::db::require_db;
use crate::domain::Catalog;
use crate::error::AppError;
use crate::state::app_state::{AppState, FlavorImages};
use crate::state::rng::RngSource;

pub use mutation::RoomMutation;
pub use responses::{
    CreateRoomResponse, JoinRoomResponse, LeaveRoomResponse, NextTurnResponse,
    PetitionResponse, ResolveResponse, StartGameResponse, ToggleReadyResponse, VoteResponse,
};

#[derive(Clone)]
pub struct RoomService {
    db: DatabaseConnection,
    catalog: Arc<Catalog>,
    reviewer: Arc<dyn PetitionReviewer>,
    review_timeout: Duration,
    images: Option<FlavorImages>,
    rng: RngSource,
}

impl RoomService {
    pub fn new(state: &AppState) -> Result<Self, AppError> {
        Ok(Self {
            db: require_db(state)?.clone(),
            catalog: Arc::clone(&state.catalog),
            reviewer: Arc::clone(&state.reviewer),
            review_timeout: state.review_timeout,
            images: state.images.clone(),
            rng: state.rng.clone(),
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}
