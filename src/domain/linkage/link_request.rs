//! TelegramLinkRequest entity and its confirmation state.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{LinkToken, Timestamp};

/// The Telegram account that confirmed a link request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TelegramIdentity {
    pub user_id: i64,
    pub chat_id: i64,
}

impl TelegramIdentity {
    pub fn new(user_id: i64, chat_id: i64) -> Self {
        Self { user_id, chat_id }
    }
}

/// Where a link request is in the handshake.
///
/// A cancelled request returns to `Requested` and can be confirmed again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Requested,
    Confirmed(TelegramIdentity),
}

/// A pending account linkage, keyed by its token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRequest {
    token: LinkToken,
    state: LinkState,
    created_at: Timestamp,
}

impl LinkRequest {
    /// Starts a new request in the `Requested` state.
    pub fn new(token: LinkToken) -> Self {
        Self {
            token,
            state: LinkState::Requested,
            created_at: Timestamp::now(),
        }
    }

    /// Rebuilds a request from persisted parts.
    pub fn reconstitute(token: LinkToken, state: LinkState, created_at: Timestamp) -> Self {
        Self {
            token,
            state,
            created_at,
        }
    }

    pub fn token(&self) -> LinkToken {
        self.token
    }

    pub fn state(&self) -> LinkState {
        self.state
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self.state, LinkState::Confirmed(_))
    }

    /// Identity recorded at confirmation time, if confirmed.
    pub fn identity(&self) -> Option<TelegramIdentity> {
        match self.state {
            LinkState::Confirmed(identity) => Some(identity),
            LinkState::Requested => None,
        }
    }

    /// Records a confirmation. Confirming again overwrites the identity.
    pub fn confirm(&mut self, identity: TelegramIdentity) {
        self.state = LinkState::Confirmed(identity);
    }

    /// Reverts a confirmation, returning the identity that was cleared.
    ///
    /// Returns `None` and leaves the request untouched if it was not confirmed.
    pub fn cancel(&mut self) -> Option<TelegramIdentity> {
        let identity = self.identity()?;
        self.state = LinkState::Requested;
        Some(identity)
    }
}
