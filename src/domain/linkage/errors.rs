//! Linkage handshake error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, LinkToken, ValidationError};

/// Errors raised by the linkage handshake and registration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkageError {
    /// No link request exists for the token.
    #[error("Unknown token: {0}")]
    NotFound(LinkToken),

    /// Cancel was requested for a token that is not confirmed.
    #[error("Token {0} is not confirmed")]
    NotConfirmed(LinkToken),

    #[error("Invalid login: {0}")]
    InvalidLogin(ValidationError),

    #[error("Login '{0}' is already taken")]
    LoginTaken(String),

    /// Registration referenced a token that does not exist.
    #[error("Invalid telegram token")]
    InvalidRegistrationToken,

    /// Registration raced a cancel, or the bot has not confirmed yet.
    #[error("Telegram account is not confirmed")]
    ConfirmationMissing,

    #[error("Bot error: {0}")]
    Bot(String),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl LinkageError {
    pub fn code(&self) -> ErrorCode {
        match self {
            LinkageError::NotFound(_) => ErrorCode::NotFound,
            LinkageError::NotConfirmed(_) => ErrorCode::NotConfirmed,
            LinkageError::InvalidLogin(_) => ErrorCode::ValidationFailed,
            LinkageError::LoginTaken(_) => ErrorCode::Conflict,
            LinkageError::InvalidRegistrationToken => ErrorCode::ValidationFailed,
            LinkageError::ConfirmationMissing => ErrorCode::ExpectationFailed,
            LinkageError::Bot(_) => ErrorCode::BotError,
            LinkageError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<ValidationError> for LinkageError {
    fn from(err: ValidationError) -> Self {
        LinkageError::InvalidLogin(err)
    }
}

impl From<DomainError> for LinkageError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Conflict => LinkageError::LoginTaken(err.message),
            ErrorCode::BotError => LinkageError::Bot(err.message),
            _ => LinkageError::Infrastructure(err.to_string()),
        }
    }
}
