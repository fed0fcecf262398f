//! Room and shared list error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, RoomId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    #[error("Room not found: {0}")]
    NotFound(RoomId),

    /// Caller is not a member of the room.
    #[error("Not a member of this room")]
    Forbidden,

    /// Caller is a member but the operation needs the owner.
    #[error("Only the room owner can do this")]
    NotOwner,

    #[error("Room name must be at least {min} characters long")]
    InvalidName { min: usize },

    #[error("Room '{0}' already exists")]
    DuplicateName(String),

    #[error("Owner cannot remove themselves from the room")]
    CannotRemoveOwner,

    #[error("Invite not found")]
    InviteNotFound,

    /// The store rejected a write on a unique key.
    #[error("{0}")]
    Conflict(String),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl RoomError {
    pub fn code(&self) -> ErrorCode {
        match self {
            RoomError::NotFound(_) | RoomError::InviteNotFound => ErrorCode::NotFound,
            RoomError::Forbidden => ErrorCode::Forbidden,
            RoomError::NotOwner => ErrorCode::Unauthorized,
            RoomError::InvalidName { .. } | RoomError::CannotRemoveOwner => {
                ErrorCode::ValidationFailed
            }
            RoomError::DuplicateName(_) | RoomError::Conflict(_) => ErrorCode::Conflict,
            RoomError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<DomainError> for RoomError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Conflict => RoomError::Conflict(err.message),
            _ => RoomError::Infrastructure(err.to_string()),
        }
    }
}
