//! Telegram Bot API client over reqwest.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{BotMessenger, OutgoingMessage};

use super::types::{
    AnswerCallbackQueryRequest, ApiResponse, GetUpdatesRequest, InlineKeyboardButton,
    InlineKeyboardMarkup, SendMessageRequest, Update,
};

/// Label of the inline button attached to the confirmation message.
pub const CANCEL_BUTTON_TEXT: &str = "Cancel";

/// Extra time granted on top of the long-poll timeout before reqwest gives up.
const POLL_GRACE_SECS: u64 = 10;

pub struct TelegramBotClient {
    http_client: reqwest::Client,
    api_base_url: String,
    bot_token: Secret<String>,
    poll_timeout_secs: u64,
}

impl TelegramBotClient {
    pub fn new(
        api_base_url: impl Into<String>,
        bot_token: Secret<String>,
        poll_timeout_secs: u64,
    ) -> Result<Self, DomainError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(poll_timeout_secs + POLL_GRACE_SECS))
            .build()
            .map_err(|e| bot_error(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            bot_token,
            poll_timeout_secs,
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.api_base_url,
            self.bot_token.expose_secret(),
            method
        )
    }

    async fn call<Req, Resp>(&self, method: &str, request: &Req) -> Result<Resp, DomainError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let response = self
            .http_client
            .post(self.method_url(method))
            .json(request)
            .send()
            .await
            // reqwest errors embed the URL, which carries the token
            .map_err(|e| bot_error(format!("{method} request failed: {}", e.without_url())))?;

        let status = response.status();
        let body: ApiResponse<Resp> = response
            .json()
            .await
            .map_err(|e| bot_error(format!("failed to parse {method} response: {}", e.without_url())))?;

        if !body.ok {
            let description = body.description.unwrap_or_default();
            tracing::error!(%status, method, error = %description, "Telegram API call failed");
            return Err(bot_error(format!("{method} rejected: {description}")));
        }

        body.result
            .ok_or_else(|| bot_error(format!("{method} returned no result")))
    }

    /// Long-polls for updates after `offset`.
    pub async fn get_updates(&self, offset: i64) -> Result<Vec<Update>, DomainError> {
        let request = GetUpdatesRequest {
            offset,
            timeout: self.poll_timeout_secs,
            allowed_updates: vec!["message", "callback_query"],
        };
        self.call("getUpdates", &request).await
    }
}

fn bot_error(message: impl Into<String>) -> DomainError {
    DomainError::new(ErrorCode::BotError, message)
}

/// Builds the Bot API request for an outgoing message.
pub(crate) fn send_message_request(message: OutgoingMessage) -> SendMessageRequest {
    let reply_markup = message.cancel_button.map(|token| {
        InlineKeyboardMarkup::single_button(InlineKeyboardButton {
            text: CANCEL_BUTTON_TEXT.to_string(),
            callback_data: token.to_string(),
        })
    });
    SendMessageRequest {
        chat_id: message.chat_id,
        text: message.text,
        reply_markup,
    }
}

#[async_trait]
impl BotMessenger for TelegramBotClient {
    async fn send(&self, message: OutgoingMessage) -> Result<(), DomainError> {
        let chat_id = message.chat_id;
        let _: serde_json::Value = self
            .call("sendMessage", &send_message_request(message))
            .await?;
        tracing::debug!(chat_id, "telegram message sent");
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<(), DomainError> {
        let request = AnswerCallbackQueryRequest {
            callback_query_id: callback_id.to_string(),
        };
        let _: bool = self.call("answerCallbackQuery", &request).await?;
        Ok(())
    }
}

/// Messenger used when the bot is switched off. Drops every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledBotMessenger;

#[async_trait]
impl BotMessenger for DisabledBotMessenger {
    async fn send(&self, message: OutgoingMessage) -> Result<(), DomainError> {
        tracing::debug!(chat_id = message.chat_id, "telegram disabled, message dropped");
        Ok(())
    }

    async fn answer_callback(&self, _callback_id: &str) -> Result<(), DomainError> {
        Ok(())
    }
}
