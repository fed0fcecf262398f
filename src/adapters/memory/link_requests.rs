//! In-memory link request store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, LinkToken, Timestamp};
use crate::domain::linkage::{LinkRequest, TelegramIdentity};
use crate::ports::LinkRequestRepository;

/// Link requests in a map. Each operation holds the write lock for its whole
/// read-modify-write, which gives the same single-record atomicity as the
/// conditional SQL statements.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLinkRequestRepository {
    requests: Arc<RwLock<HashMap<LinkToken, LinkRequest>>>,
}

impl InMemoryLinkRequestRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored requests (for tests).
    pub async fn len(&self) -> usize {
        self.requests.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.requests.read().await.is_empty()
    }
}

#[async_trait]
impl LinkRequestRepository for InMemoryLinkRequestRepository {
    async fn insert(&self, request: &LinkRequest) -> Result<(), DomainError> {
        let mut requests = self.requests.write().await;
        if requests.contains_key(&request.token()) {
            return Err(DomainError::conflict(request.token().to_string()));
        }
        requests.insert(request.token(), request.clone());
        Ok(())
    }

    async fn find(&self, token: &LinkToken) -> Result<Option<LinkRequest>, DomainError> {
        Ok(self.requests.read().await.get(token).cloned())
    }

    async fn confirm(
        &self,
        token: &LinkToken,
        identity: TelegramIdentity,
    ) -> Result<bool, DomainError> {
        let mut requests = self.requests.write().await;
        match requests.get_mut(token) {
            Some(request) => {
                request.confirm(identity);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn cancel_confirmed(
        &self,
        token: &LinkToken,
    ) -> Result<Option<TelegramIdentity>, DomainError> {
        let mut requests = self.requests.write().await;
        Ok(requests.get_mut(token).and_then(LinkRequest::cancel))
    }

    async fn consume_confirmed(
        &self,
        token: &LinkToken,
    ) -> Result<Option<LinkRequest>, DomainError> {
        let mut requests = self.requests.write().await;
        let confirmed = requests
            .get(token)
            .map(LinkRequest::is_confirmed)
            .unwrap_or(false);
        if confirmed {
            Ok(requests.remove(token))
        } else {
            Ok(None)
        }
    }

    async fn delete_created_before(&self, cutoff: Timestamp) -> Result<u64, DomainError> {
        let mut requests = self.requests.write().await;
        let before = requests.len();
        requests.retain(|_, r| !r.created_at().is_before(&cutoff));
        Ok((before - requests.len()) as u64)
    }
}
