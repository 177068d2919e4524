//! Error codes for the Polis backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that
//! appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the Polis backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authorization
    /// Missing caller identity
    Unauthorized,
    /// Caller is not the room host
    NotHost,

    // Request Validation
    InvalidRoomId,
    InvalidUserId,
    InvalidDisplayName,
    InvalidPolicy,
    InvalidPetition,
    /// Operation not allowed in the current room status
    PhaseMismatch,
    NotEnoughPlayers,
    NotAllReady,
    NotAllVoted,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,
    /// Invalid or missing HTTP header
    InvalidHeader,

    // Resource Not Found
    RoomNotFound,
    PlayerNotFound,
    PolicyNotFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    RoomFull,
    AlreadyInRoom,
    NotInRoom,
    PetitionUsed,
    IdeologyExhausted,
    /// Optimistic lock conflict
    OptimisticLock,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Database timeout (gateway timeout)
    DbTimeout,
    /// Unique constraint violation
    UniqueViolation,
    /// Record not found (generic 404 for DB-driven not-found)
    RecordNotFound,
    /// Policy reviewer or image generator unavailable
    AiUnavailable,

    /// Internal server error (explicit problem code)
    InternalError,
    /// Configuration error
    ConfigError,
    /// Data corruption detected
    DataCorruption,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::NotHost => "NOT_HOST",

            Self::InvalidRoomId => "INVALID_ROOM_ID",
            Self::InvalidUserId => "INVALID_USER_ID",
            Self::InvalidDisplayName => "INVALID_DISPLAY_NAME",
            Self::InvalidPolicy => "INVALID_POLICY",
            Self::InvalidPetition => "INVALID_PETITION",
            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::NotEnoughPlayers => "NOT_ENOUGH_PLAYERS",
            Self::NotAllReady => "NOT_ALL_READY",
            Self::NotAllVoted => "NOT_ALL_VOTED",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::InvalidHeader => "INVALID_HEADER",

            Self::RoomNotFound => "ROOM_NOT_FOUND",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::PolicyNotFound => "POLICY_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::RoomFull => "ROOM_FULL",
            Self::AlreadyInRoom => "ALREADY_IN_ROOM",
            Self::NotInRoom => "NOT_IN_ROOM",
            Self::PetitionUsed => "PETITION_USED",
            Self::IdeologyExhausted => "IDEOLOGY_EXHAUSTED",
            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::UniqueViolation => "UNIQUE_VIOLATION",
            Self::RecordNotFound => "RECORD_NOT_FOUND",
            Self::AiUnavailable => "AI_UNAVAILABLE",

            Self::InternalError => "INTERNAL_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
