//! Error codes for the hexlink backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

use crate::errors::domain::{
    ConflictKind, DomainError, ForbiddenKind, InfraErrorKind, NotFoundKind, ValidationKind,
};

/// Centralized error codes for the hexlink backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// Request did not name a player
    MissingPlayerId,
    /// One or more required fields were absent
    MissingParameters,
    /// Username is blank or too long
    InvalidUsername,
    /// Email is blank or malformed
    InvalidEmail,
    /// General validation error
    ValidationError,
    /// Unparseable request body
    BadRequest,
    /// Request body over the configured limit
    PayloadTooLarge,

    // Resource Not Found
    PlayerNotFound,
    RoomNotFound,
    SessionNotFound,
    NotFound,

    // Authentication
    /// Unknown username or wrong password
    InvalidCredentials,

    // Authorization
    /// Placement submitted by the player who does not hold the turn
    NotYourTurn,
    Forbidden,

    // Business Logic Conflicts
    /// Session already has a winner
    SessionFinished,
    /// Resource changed under a concurrent request
    OptimisticLock,
    RoomIdCollision,
    UniqueUsername,
    UniqueEmail,
    Conflict,

    // System Errors
    DbError,
    DbUnavailable,
    DataCorruption,
    /// Could not find a free room id within the retry budget
    RoomIdExhausted,
    Internal,
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MissingPlayerId => "MISSING_PLAYER_ID",
            Self::MissingParameters => "MISSING_PARAMETERS",
            Self::InvalidUsername => "INVALID_USERNAME",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::PayloadTooLarge => "PAYLOAD_TOO_LARGE",

            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::RoomNotFound => "ROOM_NOT_FOUND",
            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::InvalidCredentials => "INVALID_CREDENTIALS",

            Self::NotYourTurn => "NOT_YOUR_TURN",
            Self::Forbidden => "FORBIDDEN",

            Self::SessionFinished => "SESSION_FINISHED",
            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::RoomIdCollision => "ROOM_ID_COLLISION",
            Self::UniqueUsername => "UNIQUE_USERNAME",
            Self::UniqueEmail => "UNIQUE_EMAIL",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::RoomIdExhausted => "ROOM_ID_EXHAUSTED",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }

    /// Code for a domain error, chosen by its kind.
    pub fn for_domain(err: &DomainError) -> Self {
        match err {
            DomainError::Validation(kind, _) => match kind {
                ValidationKind::MissingPlayerId => Self::MissingPlayerId,
                ValidationKind::MissingParameters => Self::MissingParameters,
                ValidationKind::InvalidUsername => Self::InvalidUsername,
                ValidationKind::InvalidEmail => Self::InvalidEmail,
                ValidationKind::Other(_) => Self::ValidationError,
            },
            DomainError::NotFound(kind, _) => match kind {
                NotFoundKind::Player => Self::PlayerNotFound,
                NotFoundKind::Room => Self::RoomNotFound,
                NotFoundKind::Session => Self::SessionNotFound,
                NotFoundKind::Other(_) => Self::NotFound,
            },
            DomainError::Forbidden(kind, _) => match kind {
                ForbiddenKind::NotYourTurn => Self::NotYourTurn,
            },
            DomainError::Conflict(kind, _) => match kind {
                ConflictKind::SessionFinished => Self::SessionFinished,
                ConflictKind::OptimisticLock => Self::OptimisticLock,
                ConflictKind::RoomIdCollision => Self::RoomIdCollision,
                ConflictKind::UniqueUsername => Self::UniqueUsername,
                ConflictKind::UniqueEmail => Self::UniqueEmail,
                ConflictKind::Other(_) => Self::Conflict,
            },
            DomainError::Infra(kind, _) => match kind {
                InfraErrorKind::DbUnavailable => Self::DbUnavailable,
                InfraErrorKind::DataCorruption => Self::DataCorruption,
                InfraErrorKind::RoomIdsExhausted => Self::RoomIdExhausted,
                InfraErrorKind::Other(_) => Self::DbError,
            },
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
