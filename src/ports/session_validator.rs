//! Session token ports.
//!
//! `SessionIssuer` mints a token at login and `SessionValidator` turns a
//! presented token back into the caller's identity. Implementations must
//! check signature, issuer, audience and expiry.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, Login};

/// Validates session tokens and extracts user identity.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a raw token (without any "Bearer " prefix).
    ///
    /// * `Err(AuthError::InvalidToken)` - malformed, bad signature or claims
    /// * `Err(AuthError::TokenExpired)` - signature valid but expired
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

/// Issues session tokens for authenticated logins.
pub trait SessionIssuer: Send + Sync {
    fn issue(&self, login: &Login) -> Result<String, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::RwLock;

    struct TestSessionValidator {
        tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    }

    #[async_trait]
    impl SessionValidator for TestSessionValidator {
        async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
            self.tokens
                .read()
                .unwrap()
                .get(token)
                .cloned()
                .ok_or(AuthError::InvalidToken)
        }
    }

    #[tokio::test]
    async fn session_validator_returns_user_for_known_token() {
        let user = AuthenticatedUser::new(Login::new("alice").unwrap());
        let validator = TestSessionValidator {
            tokens: RwLock::new(HashMap::from([("t1".to_string(), user.clone())])),
        };

        assert_eq!(validator.validate("t1").await, Ok(user));
        assert_eq!(
            validator.validate("nope").await,
            Err(AuthError::InvalidToken)
        );
    }

    #[test]
    fn session_ports_are_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn SessionValidator>();
        assert_send_sync::<dyn SessionIssuer>();
    }
}
