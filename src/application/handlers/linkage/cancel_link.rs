//! CancelLinkHandler - the bot user pressed Cancel.

use std::sync::Arc;

use crate::domain::foundation::LinkToken;
use crate::domain::linkage::{LinkageError, LinkageEvent};
use crate::ports::{BotMessenger, EventPublisher, LinkRequestRepository, OutgoingMessage};

pub const CANCELLED_TEXT: &str = "Successfully canceled";

#[derive(Debug, Clone)]
pub struct CancelLinkCommand {
    pub token: LinkToken,
}

pub struct CancelLinkHandler {
    repository: Arc<dyn LinkRequestRepository>,
    publisher: Arc<dyn EventPublisher>,
    bot: Arc<dyn BotMessenger>,
}

impl CancelLinkHandler {
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

    pub async fn handle(&self, cmd: CancelLinkCommand) -> Result<(), LinkageError> {
        let identity = match self.repository.cancel_confirmed(&cmd.token).await? {
            Some(identity) => identity,
            None => {
                // Nothing changed; only the error differs
                return match self.repository.find(&cmd.token).await? {
                    Some(_) => Err(LinkageError::NotConfirmed(cmd.token)),
                    None => Err(LinkageError::NotFound(cmd.token)),
                };
            }
        };

        self.publisher
            .publish(LinkageEvent::Cancelled { token: cmd.token });

        if let Err(err) = self
            .bot
            .send(OutgoingMessage::text(identity.chat_id, CANCELLED_TEXT))
            .await
        {
            tracing::warn!(token = %cmd.token, error = %err, "cancel reply not delivered");
        }

        tracing::info!(token = %cmd.token, "link cancelled");
        Ok(())
    }
}
