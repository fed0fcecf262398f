//! BeginLinkHandler - starts a Telegram linkage for a registration attempt.

use std::sync::Arc;

use crate::domain::foundation::LinkToken;
use crate::domain::linkage::{LinkRequest, LinkageError};
use crate::ports::LinkRequestRepository;

pub struct BeginLinkHandler {
    repository: Arc<dyn LinkRequestRepository>,
}

impl BeginLinkHandler {
    pub fn new(repository: Arc<dyn LinkRequestRepository>) -> Self {
        Self { repository }
    }

    /// Persists a fresh unconfirmed request and returns its token.
    pub async fn handle(&self) -> Result<LinkToken, LinkageError> {
        let request = LinkRequest::new(LinkToken::generate());
        self.repository.insert(&request).await?;
        tracing::debug!(token = %request.token(), "link request created");
        Ok(request.token())
    }
}
