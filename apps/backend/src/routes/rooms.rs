//! Room endpoints under `/api/rooms`.
//!
//! Handlers only extract, delegate to [`RoomService`] and serialize.

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::error::AppError;
use crate::extractors::{CurrentUser, MaybeUser, RoomId, ValidatedJson};
use crate::services::rooms::RoomService;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DisplayNameBody {
    pub display_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VoteBody {
    pub policy_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PetitionBody {
    pub text: String,
}

fn service(state: &AppState) -> Result<RoomService, AppError> {
    RoomService::new(state)
}

/// POST /api/rooms
async fn create_room(
    state: web::Data<AppState>,
    user: CurrentUser,
    body: ValidatedJson<DisplayNameBody>,
) -> Result<HttpResponse, AppError> {
    let created = service(&state)?
        .create_room(&user.id, &body.display_name)
        .await?;
    Ok(HttpResponse::Created().json(created))
}

/// GET /api/rooms/{room_id}
///
/// Public room state; a member also gets their own ideology and ballot.
async fn get_room(
    state: web::Data<AppState>,
    room_id: RoomId,
    user: MaybeUser,
) -> Result<HttpResponse, AppError> {
    let view = service(&state)?
        .room_view(room_id.as_str(), user.id())
        .await?;
    Ok(HttpResponse::Ok().json(view))
}

/// POST /api/rooms/{room_id}/join
async fn join_room(
    state: web::Data<AppState>,
    room_id: RoomId,
    user: CurrentUser,
    body: ValidatedJson<DisplayNameBody>,
) -> Result<HttpResponse, AppError> {
    let joined = service(&state)?
        .join_room(room_id.as_str(), &user.id, &body.display_name)
        .await?;
    Ok(HttpResponse::Ok().json(joined))
}

/// POST /api/rooms/{room_id}/leave
async fn leave_room(
    state: web::Data<AppState>,
    room_id: RoomId,
    user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let left = service(&state)?.leave_room(room_id.as_str(), &user.id).await?;
    Ok(HttpResponse::Ok().json(left))
}

/// POST /api/rooms/{room_id}/ready
async fn toggle_ready(
    state: web::Data<AppState>,
    room_id: RoomId,
    user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let ready = service(&state)?
        .toggle_ready(room_id.as_str(), &user.id)
        .await?;
    Ok(HttpResponse::Ok().json(ready))
}

/// POST /api/rooms/{room_id}/start
async fn start_game(
    state: web::Data<AppState>,
    room_id: RoomId,
    user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let started = service(&state)?.start_game(room_id.as_str(), &user.id).await?;
    Ok(HttpResponse::Ok().json(started))
}

/// POST /api/rooms/{room_id}/votes
async fn vote(
    state: web::Data<AppState>,
    room_id: RoomId,
    user: CurrentUser,
    body: ValidatedJson<VoteBody>,
) -> Result<HttpResponse, AppError> {
    let receipt = service(&state)?
        .vote(room_id.as_str(), &user.id, &body.policy_id)
        .await?;
    Ok(HttpResponse::Ok().json(receipt))
}

/// POST /api/rooms/{room_id}/resolve
///
/// Any caller may trigger resolution; the guards only look at the ballots.
async fn resolve(
    state: web::Data<AppState>,
    room_id: RoomId,
    _user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let resolved = service(&state)?.resolve(room_id.as_str()).await?;
    Ok(HttpResponse::Ok().json(resolved))
}

/// POST /api/rooms/{room_id}/next-turn
async fn next_turn(
    state: web::Data<AppState>,
    room_id: RoomId,
    _user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let advanced = service(&state)?.next_turn(room_id.as_str()).await?;
    Ok(HttpResponse::Ok().json(advanced))
}

/// POST /api/rooms/{room_id}/petitions
async fn submit_petition(
    state: web::Data<AppState>,
    room_id: RoomId,
    user: CurrentUser,
    body: ValidatedJson<PetitionBody>,
) -> Result<HttpResponse, AppError> {
    let verdict = service(&state)?
        .submit_petition(room_id.as_str(), &user.id, &body.text)
        .await?;
    Ok(HttpResponse::Ok().json(verdict))
}

/// GET /api/rooms/{room_id}/scores
async fn final_scores(
    state: web::Data<AppState>,
    room_id: RoomId,
) -> Result<HttpResponse, AppError> {
    let scores = service(&state)?.final_scores(room_id.as_str()).await?;
    Ok(HttpResponse::Ok().json(scores))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create_room))
        .route("/{room_id}", web::get().to(get_room))
        .route("/{room_id}/join", web::post().to(join_room))
        .route("/{room_id}/leave", web::post().to(leave_room))
        .route("/{room_id}/ready", web::post().to(toggle_ready))
        .route("/{room_id}/start", web::post().to(start_game))
        .route("/{room_id}/votes", web::post().to(vote))
        .route("/{room_id}/resolve", web::post().to(resolve))
        .route("/{room_id}/next-turn", web::post().to(next_turn))
        .route("/{room_id}/petitions", web::post().to(submit_petition))
        .route("/{room_id}/scores", web::get().to(final_scores));
}
