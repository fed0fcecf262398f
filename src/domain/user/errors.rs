//! Login and session error types.

use thiserror::Error;

use crate::domain::foundation::{AuthError, DomainError, ErrorCode, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthFlowError {
    #[error("Invalid login: {0}")]
    InvalidLogin(ValidationError),

    #[error("User not found")]
    UserNotFound,

    #[error("Wrong password")]
    WrongPassword,

    #[error("Session token error: {0}")]
    Token(AuthError),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl AuthFlowError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AuthFlowError::InvalidLogin(_) | AuthFlowError::UserNotFound => {
                ErrorCode::ValidationFailed
            }
            AuthFlowError::WrongPassword => ErrorCode::Unauthorized,
            AuthFlowError::Token(_) => ErrorCode::InternalError,
            AuthFlowError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<ValidationError> for AuthFlowError {
    fn from(err: ValidationError) -> Self {
        AuthFlowError::InvalidLogin(err)
    }
}

impl From<AuthError> for AuthFlowError {
    fn from(err: AuthError) -> Self {
        AuthFlowError::Token(err)
    }
}

impl From<DomainError> for AuthFlowError {
    fn from(err: DomainError) -> Self {
        AuthFlowError::Infrastructure(err.to_string())
    }
}
