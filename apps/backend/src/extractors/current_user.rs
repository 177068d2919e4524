use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Header carrying the caller's stable user id.
pub const USER_ID_HEADER: &str = "x-user-id";

const MAX_USER_ID_LEN: usize = 128;

/// Caller identity, as asserted by the fronting identity layer.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: String,
}

impl CurrentUser {
    fn from_header(value: Option<&str>) -> Result<Self, AppError> {
        let id = value.map(str::trim).unwrap_or_default();
        if id.is_empty() {
            return Err(AppError::unauthorized("Missing X-User-Id header"));
        }
        if id.len() > MAX_USER_ID_LEN || id.chars().any(char::is_control) {
            return Err(AppError::bad_request(
                ErrorCode::InvalidUserId,
                "X-User-Id must be at most 128 printable characters",
            ));
        }
        Ok(Self { id: id.to_string() })
    }
}

/// `None` when the header is absent; an error when it is present but unusable.
fn header_value(req: &HttpRequest) -> Result<Option<&str>, AppError> {
    match req.headers().get(USER_ID_HEADER) {
        None => Ok(None),
        Some(h) => h.to_str().map(Some).map_err(|_| {
            AppError::bad_request(ErrorCode::InvalidHeader, "X-User-Id is not valid UTF-8")
        }),
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(header_value(req).and_then(Self::from_header))
    }
}

/// Identity when present; outsiders may still read public room state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaybeUser(pub Option<CurrentUser>);

impl MaybeUser {
    pub fn id(&self) -> Option<&str> {
        self.0.as_ref().map(|u| u.id.as_str())
    }
}

impl FromRequest for MaybeUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = header_value(req).and_then(|value| match value {
            None => Ok(MaybeUser(None)),
            Some(v) => CurrentUser::from_header(Some(v)).map(|u| MaybeUser(Some(u))),
        });
        ready(result)
    }
}
