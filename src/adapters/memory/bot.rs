//! Bot messenger that records outgoing messages instead of sending them.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{BotMessenger, OutgoingMessage};

/// Captures every message for assertions. Optionally fails every send.
#[derive(Debug, Default)]
pub struct RecordingBotMessenger {
    sent: Mutex<Vec<OutgoingMessage>>,
    answered: Mutex<Vec<String>>,
    fail: bool,
}

impl RecordingBotMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    /// A messenger whose sends all fail, as if the Bot API were down.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<OutgoingMessage> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }

    pub fn answered_callbacks(&self) -> Vec<String> {
        self.answered
            .lock()
            .map(|answered| answered.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl BotMessenger for RecordingBotMessenger {
    async fn send(&self, message: OutgoingMessage) -> Result<(), DomainError> {
        if self.fail {
            return Err(DomainError::new(ErrorCode::BotError, "simulated bot outage"));
        }
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(message);
        }
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<(), DomainError> {
        if let Ok(mut answered) = self.answered.lock() {
            answered.push(callback_id.to_string());
        }
        Ok(())
    }
}
