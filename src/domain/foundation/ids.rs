//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Minimum length of a user login.
pub const MIN_LOGIN_LENGTH: usize = 3;

/// Unique identifier for a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(Uuid);

impl RoomId {
    /// Creates a new random RoomId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a RoomId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RoomId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RoomId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Identity of a shop-list item, stable across edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Creates a new random ItemId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an ItemId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Opaque single-use token tying a registration attempt to a bot confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkToken(Uuid);

impl LinkToken {
    /// Generates a fresh, unguessable token.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a LinkToken from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for LinkToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LinkToken {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s.trim())?))
    }
}

/// User login, the natural key of a user.
///
/// Only ASCII letters, digits, `_` and `-` are allowed, at least
/// [`MIN_LOGIN_LENGTH`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Login(String);

impl Login {
    /// Creates a validated login.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::empty_field("login"));
        }
        if !value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(ValidationError::invalid_format(
                "login",
                "Login should match [a-zA-Z0-9_-]",
            ));
        }
        if value.len() < MIN_LOGIN_LENGTH {
            return Err(ValidationError::too_short("login", MIN_LOGIN_LENGTH));
        }
        Ok(Self(value))
    }

    /// Returns the login as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Login {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Login {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Login::new(value)
    }
}

impl From<Login> for String {
    fn from(login: Login) -> Self {
        login.0
    }
}

impl FromStr for Login {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Login::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_id_round_trips_through_string() {
        let id = RoomId::new();
        let parsed: RoomId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn link_tokens_are_unique() {
        assert_ne!(LinkToken::generate(), LinkToken::generate());
    }

    #[test]
    fn link_token_parse_ignores_surrounding_whitespace() {
        let token = LinkToken::generate();
        let parsed: LinkToken = format!("  {} ", token).parse().unwrap();
        assert_eq!(token, parsed);
    }

    #[test]
    fn link_token_rejects_garbage() {
        assert!("not-a-token".parse::<LinkToken>().is_err());
    }

    #[test]
    fn login_accepts_allowed_characters() {
        assert!(Login::new("alice_01-x").is_ok());
    }

    #[test]
    fn login_rejects_short_values() {
        assert_eq!(
            Login::new("ab"),
            Err(ValidationError::too_short("login", MIN_LOGIN_LENGTH))
        );
    }

    #[test]
    fn login_rejects_forbidden_characters() {
        assert!(matches!(
            Login::new("alice smith"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(Login::new("алиса").is_err());
    }

    #[test]
    fn login_rejects_empty() {
        assert_eq!(Login::new(""), Err(ValidationError::empty_field("login")));
    }

    #[test]
    fn login_deserialization_validates() {
        let ok: Result<Login, _> = serde_json::from_str("\"bob42\"");
        assert!(ok.is_ok());
        let bad: Result<Login, _> = serde_json::from_str("\"b!\"");
        assert!(bad.is_err());
    }
}
