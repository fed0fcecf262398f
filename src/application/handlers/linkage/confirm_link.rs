//! ConfirmLinkHandler - the bot user sent `/start <token>`.

use std::sync::Arc;

use crate::domain::foundation::LinkToken;
use crate::domain::linkage::{LinkageError, LinkageEvent, TelegramIdentity};
use crate::ports::{BotMessenger, EventPublisher, LinkRequestRepository, OutgoingMessage};

pub const CONFIRMED_TEXT: &str =
    "Successfully confirmed. Please continue your registration on site or cancel";

#[derive(Debug, Clone)]
pub struct ConfirmLinkCommand {
    pub token: LinkToken,
    pub identity: TelegramIdentity,
    /// Telegram username, if the account has one.
    pub display_name: Option<String>,
}

pub struct ConfirmLinkHandler {
    repository: Arc<dyn LinkRequestRepository>,
    publisher: Arc<dyn EventPublisher>,
    bot: Arc<dyn BotMessenger>,
}

impl ConfirmLinkHandler {
    pub fn new(
        repository: Arc<dyn LinkRequestRepository>,
        publisher: Arc<dyn EventPublisher>,
        bot: Arc<dyn BotMessenger>,
    ) -> Self {
        Self {
            repository,
            publisher,
            bot,
        }
    }

    pub async fn handle(&self, cmd: ConfirmLinkCommand) -> Result<(), LinkageError> {
        // 1. Conditional update, the store decides whether the token exists
        if !self.repository.confirm(&cmd.token, cmd.identity).await? {
            return Err(LinkageError::NotFound(cmd.token));
        }

        // 2. Tell every browser tab watching this token
        self.publisher.publish(LinkageEvent::Confirmed {
            token: cmd.token,
            display_name: cmd.display_name,
        });

        // 3. Offer a way back out
        let message = OutgoingMessage::text(cmd.identity.chat_id, CONFIRMED_TEXT)
            .with_cancel_button(cmd.token);
        if let Err(err) = self.bot.send(message).await {
            tracing::warn!(token = %cmd.token, error = %err, "confirmation reply not delivered");
        }

        tracing::info!(token = %cmd.token, telegram_user = cmd.identity.user_id, "link confirmed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryLinkRequestRepository, RecordingBotMessenger, RecordingEventPublisher,
    };
    use crate::domain::linkage::LinkRequest;

    struct Fixture {
        repo: Arc<InMemoryLinkRequestRepository>,
        publisher: Arc<RecordingEventPublisher>,
        bot: Arc<RecordingBotMessenger>,
        handler: ConfirmLinkHandler,
    }

    fn fixture_with(bot: RecordingBotMessenger) -> Fixture {
        let repo = Arc::new(InMemoryLinkRequestRepository::new());
        let publisher = Arc::new(RecordingEventPublisher::new());
        let bot = Arc::new(bot);
        let handler = ConfirmLinkHandler::new(repo.clone(), publisher.clone(), bot.clone());
        Fixture {
            repo,
            publisher,
            bot,
            handler,
        }
    }

    fn command(token: LinkToken) -> ConfirmLinkCommand {
        ConfirmLinkCommand {
            token,
            identity: TelegramIdentity::new(42, 4200),
            display_name: Some("alice_tg".to_string()),
        }
    }

    #[tokio::test]
    async fn confirms_publishes_and_replies_with_cancel_button() {
        let f = fixture_with(RecordingBotMessenger::new());
        let request = LinkRequest::new(LinkToken::generate());
        f.repo.insert(&request).await.unwrap();

        f.handler.handle(command(request.token())).await.unwrap();

        let stored = f.repo.find(&request.token()).await.unwrap().unwrap();
        assert_eq!(stored.identity(), Some(TelegramIdentity::new(42, 4200)));
        assert_eq!(
            f.publisher.published(),
            vec![LinkageEvent::Confirmed {
                token: request.token(),
                display_name: Some("alice_tg".to_string()),
            }]
        );
        let sent = f.bot.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].chat_id, 4200);
        assert_eq!(sent[0].text, CONFIRMED_TEXT);
        assert_eq!(sent[0].cancel_button, Some(request.token()));
    }

    #[tokio::test]
    async fn unknown_token_is_not_found_and_silent() {
        let f = fixture_with(RecordingBotMessenger::new());
        let token = LinkToken::generate();

        let result = f.handler.handle(command(token)).await;

        assert_eq!(result, Err(LinkageError::NotFound(token)));
        assert!(f.publisher.published().is_empty());
        assert!(f.bot.sent().is_empty());
    }

    #[tokio::test]
    async fn bot_outage_does_not_undo_confirmation() {
        let f = fixture_with(RecordingBotMessenger::failing());
        let request = LinkRequest::new(LinkToken::generate());
        f.repo.insert(&request).await.unwrap();

        assert!(f.handler.handle(command(request.token())).await.is_ok());
        assert!(f.repo.find(&request.token()).await.unwrap().unwrap().is_confirmed());
    }
}
