//! Events broadcast while a link request changes state.

use crate::domain::foundation::LinkToken;

/// State change of a link request, routed to the clients watching its token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkageEvent {
    /// The bot user confirmed the token. `display_name` is their Telegram
    /// username when they have one.
    Confirmed {
        token: LinkToken,
        display_name: Option<String>,
    },
    /// The bot user pressed Cancel on a confirmed token.
    Cancelled { token: LinkToken },
}

impl LinkageEvent {
    pub fn token(&self) -> LinkToken {
        match self {
            LinkageEvent::Confirmed { token, .. } | LinkageEvent::Cancelled { token } => *token,
        }
    }
}
