//! Bot update dispatch and the long-poll loop.
//!
//! `/start <token>` confirms a link request; pressing the inline Cancel
//! button (callback data = token) cancels it. Everything else is ignored.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::application::handlers::linkage::{
    CancelLinkCommand, CancelLinkHandler, ConfirmLinkCommand, ConfirmLinkHandler,
};
use crate::domain::foundation::LinkToken;
use crate::domain::linkage::{LinkageError, TelegramIdentity};
use crate::ports::{BotMessenger, OutgoingMessage};

use super::client::TelegramBotClient;
use super::types::{CallbackQuery, Message, Update};

pub const NOT_A_USER_TEXT: &str = "Err. Command used not by user?!";
pub const WRONG_ARGUMENTS_TEXT: &str = "Err. Incorrect number of arguments.";
pub const UNKNOWN_TOKEN_TEXT: &str = "Err. Unknown token";

/// Pause after a failed poll before trying again.
const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Routes bot updates to the linkage handlers.
pub struct BotCommandDispatcher {
    confirm: ConfirmLinkHandler,
    cancel: CancelLinkHandler,
    bot: Arc<dyn BotMessenger>,
}

impl BotCommandDispatcher {
    pub fn new(
        confirm: ConfirmLinkHandler,
        cancel: CancelLinkHandler,
        bot: Arc<dyn BotMessenger>,
    ) -> Self {
        Self {
            confirm,
            cancel,
            bot,
        }
    }

    pub async fn dispatch(&self, update: Update) {
        if let Some(message) = update.message {
            self.on_message(message).await;
        } else if let Some(callback) = update.callback_query {
            self.on_callback(callback).await;
        }
    }

    async fn on_message(&self, message: Message) {
        let Some(args) = message.text.as_deref().and_then(start_arguments) else {
            return;
        };
        let chat_id = message.chat.id;

        let Some(from) = message.from else {
            self.reply(chat_id, NOT_A_USER_TEXT).await;
            return;
        };

        let [raw_token] = args.as_slice() else {
            self.reply(chat_id, WRONG_ARGUMENTS_TEXT).await;
            return;
        };

        let Ok(token) = raw_token.parse::<LinkToken>() else {
            self.reply(chat_id, UNKNOWN_TOKEN_TEXT).await;
            return;
        };

        let cmd = ConfirmLinkCommand {
            token,
            identity: TelegramIdentity {
                user_id: from.id,
                chat_id,
            },
            display_name: from.username,
        };
        match self.confirm.handle(cmd).await {
            Ok(()) => {}
            Err(LinkageError::NotFound(_)) => self.reply(chat_id, UNKNOWN_TOKEN_TEXT).await,
            Err(err) => tracing::error!(%token, error = %err, "link confirmation failed"),
        }
    }

    async fn on_callback(&self, callback: CallbackQuery) {
        if let Err(err) = self.bot.answer_callback(&callback.id).await {
            tracing::warn!(error = %err, "failed to answer callback query");
        }

        let Some(token) = callback.data.as_deref().and_then(|d| d.parse::<LinkToken>().ok())
        else {
            tracing::debug!(user_id = callback.from.id, "callback without a link token");
            return;
        };

        match self.cancel.handle(CancelLinkCommand { token }).await {
            Ok(()) => {}
            Err(LinkageError::NotFound(_) | LinkageError::NotConfirmed(_)) => {
                tracing::debug!(%token, "cancel ignored for unknown or unconfirmed token");
            }
            Err(err) => tracing::error!(%token, error = %err, "link cancellation failed"),
        }
    }

    async fn reply(&self, chat_id: i64, text: &str) {
        if let Err(err) = self.bot.send(OutgoingMessage::text(chat_id, text)).await {
            tracing::warn!(chat_id, error = %err, "bot reply not delivered");
        }
    }
}

/// Arguments of a `/start` command, or `None` for any other text.
///
/// Accepts the `/start@BotName` form used in group chats.
fn start_arguments(text: &str) -> Option<Vec<&str>> {
    let mut words = text.split_whitespace();
    let command = words.next()?;
    let name = command.split('@').next()?;
    (name == "/start").then(|| words.collect())
}

/// Runs the long-poll loop until `shutdown` flips to `true`.
pub async fn run_polling(
    client: Arc<TelegramBotClient>,
    dispatcher: BotCommandDispatcher,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut offset = 0i64;
    tracing::info!("telegram polling started");

    loop {
        let updates = tokio::select! {
            _ = shutdown.changed() => break,
            result = client.get_updates(offset) => result,
        };

        match updates {
            Ok(updates) => {
                for update in updates {
                    offset = offset.max(update.update_id + 1);
                    dispatcher.dispatch(update).await;
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "telegram poll failed, retrying");
                tokio::select! {
                    _ = shutdown.changed() => break,
                    _ = tokio::time::sleep(RETRY_DELAY) => {}
                }
            }
        }
    }

    tracing::info!("telegram polling stopped");
}
