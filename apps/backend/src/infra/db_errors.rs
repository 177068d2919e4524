//! SeaORM -> DomainError translation.
//!
//! Adapters return raw `DbErr`; repos convert through [`map_db_err`] so
//! services only ever see `DomainError`.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::logging::pii::Redacted;
use crate::trace_ctx;

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// `table.column` list from "UNIQUE constraint failed: a.b, a.c".
fn sqlite_unique_columns(msg: &str) -> Option<&str> {
    let (_, rest) = msg.split_once("UNIQUE constraint failed: ")?;
    Some(rest.lines().next().unwrap_or(rest).trim())
}

fn unique_violation_kind(msg: &str) -> Option<(ConflictKind, &'static str)> {
    let seat_conflict = sqlite_unique_columns(msg)
        .map(|cols| cols.contains("room_players.room_id") && cols.contains("room_players.user_id"))
        .unwrap_or(false)
        || msg.contains("ux_room_players_room_user");
    if seat_conflict {
        return Some((ConflictKind::AlreadyInRoom, "Player already in room"));
    }
    if msg.contains("rooms.id") || msg.contains("rooms_pkey") {
        return Some((ConflictKind::Other("Unique".into()), "Room id already taken"));
    }
    None
}

/// Translate a `DbErr` into a `DomainError` with PII-safe detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        sea_orm::DbErr::RecordNotFound(msg) => {
            if let Some(room_id) = msg.strip_prefix("ROOM_NOT_FOUND:") {
                warn!(trace_id = %trace_id, room_id, "Room not found");
                return DomainError::not_found(
                    NotFoundKind::Room,
                    format!("Room {room_id} not found"),
                );
            }
            return DomainError::not_found(NotFoundKind::Other("Record".into()), "Record not found");
        }
        sea_orm::DbErr::Custom(msg) if msg.starts_with("OPTIMISTIC_LOCK:") => {
            #[derive(serde::Deserialize)]
            struct LockInfo {
                expected: i32,
                actual: i32,
            }

            let parsed = msg
                .strip_prefix("OPTIMISTIC_LOCK:")
                .and_then(|json| serde_json::from_str::<LockInfo>(json).ok());
            return match parsed {
                Some(info) => {
                    warn!(
                        trace_id = %trace_id,
                        expected = info.expected,
                        actual = info.actual,
                        "Optimistic lock conflict detected"
                    );
                    DomainError::conflict(
                        ConflictKind::OptimisticLock,
                        format!(
                            "Room was modified concurrently (expected version {}, actual version {}). Please retry.",
                            info.expected, info.actual
                        ),
                    )
                }
                None => {
                    warn!(trace_id = %trace_id, "Optimistic lock conflict detected (version info unavailable)");
                    DomainError::conflict(
                        ConflictKind::OptimisticLock,
                        "Room was modified by another request; please retry",
                    )
                }
            };
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    // SQLITE_BUSY / SQLITE_LOCKED: another writer holds the database
    if error_msg.contains("database is locked") || error_msg.contains("database table is locked") {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "SQLite writer busy");
        return DomainError::conflict(
            ConflictKind::OptimisticLock,
            "Room is being modified by another request; please retry",
        );
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unique constraint violation");
        if let Some((kind, detail)) = unique_violation_kind(&error_msg) {
            return DomainError::conflict(kind, detail);
        }
        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if mentions_sqlstate(&error_msg, "23503") || error_msg.contains("FOREIGN KEY constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Foreign key constraint violation");
        return DomainError::not_found(NotFoundKind::Room, "Room not found");
    }

    if error_msg.contains("timeout") || error_msg.contains("timed out") {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database timeout");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        map_db_err(e)
    }
}
