use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::lifecycle::{self, NextTurnOutcome};
use crate::domain::{RoomStatus, VoteResult};
use crate::services::rooms::{NextTurnResponse, ResolveResponse, RoomService, VoteResponse};
use crate::AppError;

impl RoomService {
    /// Record the caller's ballot. The ballot that completes the set
    /// resolves the vote in the same transaction, so concurrent last votes
    /// produce exactly one result.
    pub async fn vote(
        &self,
        room_id: &str,
        user_id: &str,
        policy_id: &str,
    ) -> Result<VoteResponse, AppError> {
        debug!(room_id, user_id, policy_id, "Casting vote");
        let catalog = Arc::clone(&self.catalog);
        let (uid, pid) = (user_id.to_string(), policy_id.to_string());

        let result = self
            .run_mutation(room_id, move |agg, rng| {
                if !lifecycle::vote(agg, &uid, &pid)? {
                    return Ok(None);
                }
                lifecycle::resolve(agg, &catalog, rng).map(Some)
            })
            .await?;

        let Some(vote_result) = result.output else {
            return Ok(VoteResponse {
                success: true,
                all_voted: false,
                resolved: None,
                last_result: None,
                city_state: None,
                game_over: None,
            });
        };

        let room = &result.record.aggregate.room;
        let game_over = room.status == RoomStatus::Finished;
        let city_state = room.city;
        log_resolution(room_id, room.turn, &vote_result, game_over);
        let last_result = self.attach_flavor_image(&result.record, vote_result).await;

        Ok(VoteResponse {
            success: true,
            all_voted: true,
            resolved: Some(true),
            last_result: Some(last_result),
            city_state: Some(city_state),
            game_over: Some(game_over),
        })
    }

    /// Explicitly resolve a fully voted turn.
    pub async fn resolve(&self, room_id: &str) -> Result<ResolveResponse, AppError> {
        debug!(room_id, "Resolving vote");
        let catalog = Arc::clone(&self.catalog);

        let result = self
            .run_mutation(room_id, move |agg, rng| lifecycle::resolve(agg, &catalog, rng))
            .await?;

        let room = &result.record.aggregate.room;
        let (status, city_state, turn) = (room.status, room.city, room.turn);
        let game_over = status == RoomStatus::Finished;
        log_resolution(room_id, turn, &result.output, game_over);
        let last_result = self
            .attach_flavor_image(&result.record, result.output.clone())
            .await;

        Ok(ResolveResponse {
            status,
            last_result,
            city_state,
            game_over,
        })
    }

    pub async fn next_turn(&self, room_id: &str) -> Result<NextTurnResponse, AppError> {
        debug!(room_id, "Advancing turn");

        let result = self.run_mutation(room_id, |agg, _rng| lifecycle::next_turn(agg)).await?;

        let room = &result.record.aggregate.room;
        match result.output {
            NextTurnOutcome::Dealt => info!(room_id, turn = room.turn, "Next hand dealt"),
            NextTurnOutcome::Finished => info!(room_id, turn = room.turn, "Deck exhausted, game finished"),
        }
        Ok(NextTurnResponse {
            status: room.status,
            turn: room.turn,
        })
    }
}

fn log_resolution(room_id: &str, turn: u32, result: &VoteResult, game_over: bool) {
    info!(
        room_id,
        turn,
        passed_policy_id = %result.passed_policy_id,
        game_over,
        "Vote resolved"
    );
}
