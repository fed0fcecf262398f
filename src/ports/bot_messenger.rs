//! Outbound messaging through the Telegram bot.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, LinkToken};

/// A message to a Telegram chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub chat_id: i64,
    pub text: String,
    /// Attach an inline Cancel button whose callback data is this token.
    pub cancel_button: Option<LinkToken>,
}

impl OutgoingMessage {
    pub fn text(chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            cancel_button: None,
        }
    }

    pub fn with_cancel_button(mut self, token: LinkToken) -> Self {
        self.cancel_button = Some(token);
        self
    }
}

#[async_trait]
pub trait BotMessenger: Send + Sync {
    /// Send a message.
    ///
    /// # Errors
    ///
    /// - `BotError` if the Bot API rejects the call or is unreachable
    async fn send(&self, message: OutgoingMessage) -> Result<(), DomainError>;

    /// Acknowledge an inline button press so the client stops its spinner.
    async fn answer_callback(&self, callback_id: &str) -> Result<(), DomainError>;
}
