//! Single-use invite codes.

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::RoomId;

/// Length of a generated invite code.
pub const INVITE_CODE_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InviteCode(String);

impl InviteCode {
    /// Generates a random alphanumeric code.
    pub fn generate() -> Self {
        let code: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(INVITE_CODE_LEN)
            .map(char::from)
            .collect();
        Self(code)
    }

    /// Wraps a code received from a client. No validation: unknown codes
    /// simply fail to redeem.
    pub fn from_string(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InviteCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pending invite into a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomInvite {
    pub code: InviteCode,
    pub room_id: RoomId,
}

impl RoomInvite {
    pub fn new(room_id: RoomId) -> Self {
        Self {
            code: InviteCode::generate(),
            room_id,
        }
    }
}
