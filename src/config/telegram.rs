//! Telegram bot configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    /// Run the bot long-poll worker
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Bot API token from BotFather
    pub bot_token: Option<Secret<String>>,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// `getUpdates` long-poll timeout in seconds
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_secs: u64,
}

impl TelegramConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.enabled {
            let has_token = self
                .bot_token
                .as_ref()
                .is_some_and(|t| !t.expose_secret().is_empty());
            if !has_token {
                return Err(ValidationError::MissingRequired("TELEGRAM__BOT_TOKEN"));
            }
        }
        if self.poll_timeout_secs == 0 || self.poll_timeout_secs > 60 {
            return Err(ValidationError::InvalidPollTimeout);
        }
        Ok(())
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            bot_token: None,
            api_base_url: default_api_base_url(),
            poll_timeout_secs: default_poll_timeout(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_api_base_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_poll_timeout() -> u64 {
    30
}
