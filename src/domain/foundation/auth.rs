//! Authentication types for the domain layer.
//!
//! These types represent an authenticated caller extracted from a session
//! token. They have no dependency on the token format; the `SessionValidator`
//! port populates them.

use super::Login;
use thiserror::Error;

/// Authenticated user extracted from a validated session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Verified login of the caller.
    pub login: Login,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(login: Login) -> Self {
        Self { login }
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Token is malformed, has a bad signature or wrong claims.
    #[error("Invalid token")]
    InvalidToken,

    /// Token signature is valid but it has expired.
    #[error("Token expired")]
    TokenExpired,

    /// Token could not be produced.
    #[error("Token issuance failed: {0}")]
    IssuanceFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authenticated_user_carries_login() {
        let login = Login::new("alice").unwrap();
        let user = AuthenticatedUser::new(login.clone());
        assert_eq!(user.login, login);
    }

    #[test]
    fn auth_error_messages() {
        assert_eq!(AuthError::InvalidToken.to_string(), "Invalid token");
        assert_eq!(AuthError::TokenExpired.to_string(), "Token expired");
    }
}
