use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use ulid::Ulid;

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Room id from the `{room_id}` path segment, checked to be a ULID.
///
/// Existence is not checked here; the service reports `ROOM_NOT_FOUND`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomId(pub String);

impl RoomId {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        Ulid::from_string(raw)
            .map(|ulid| RoomId(ulid.to_string()))
            .map_err(|_| {
                AppError::bad_request(ErrorCode::InvalidRoomId, format!("Invalid room id: {raw}"))
            })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromRequest for RoomId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = match req.match_info().get("room_id") {
            Some(raw) => Self::parse(raw),
            None => Err(AppError::bad_request(
                ErrorCode::InvalidRoomId,
                "Missing room_id parameter",
            )),
        };
        ready(result)
    }
}
