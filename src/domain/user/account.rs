//! Registered user.

use super::Credential;
use crate::domain::foundation::Login;
use crate::domain::linkage::TelegramIdentity;

/// A registered user, linked to the Telegram account that confirmed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub login: Login,
    pub credential: Credential,
    pub telegram: TelegramIdentity,
}

impl User {
    /// Registers a user, hashing the password under a new salt.
    pub fn register(login: Login, password: &str, telegram: TelegramIdentity) -> Self {
        Self {
            login,
            credential: Credential::derive(password),
            telegram,
        }
    }
}
