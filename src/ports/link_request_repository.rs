//! Link request repository port.
//!
//! Every state change is a single conditional write so that the bot worker,
//! the registration endpoint and the sweeper can race on the same token
//! without a lock. Exactly one of `cancel_confirmed` and `consume_confirmed`
//! can win for a confirmed request.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, LinkToken, Timestamp};
use crate::domain::linkage::{LinkRequest, TelegramIdentity};

#[async_trait]
pub trait LinkRequestRepository: Send + Sync {
    /// Persist a new request.
    async fn insert(&self, request: &LinkRequest) -> Result<(), DomainError>;

    /// Find a request by token.
    async fn find(&self, token: &LinkToken) -> Result<Option<LinkRequest>, DomainError>;

    /// Mark the request confirmed by `identity`.
    ///
    /// Returns `false` if no request exists for the token.
    async fn confirm(
        &self,
        token: &LinkToken,
        identity: TelegramIdentity,
    ) -> Result<bool, DomainError>;

    /// Revert a confirmed request to unconfirmed, clearing its identity.
    ///
    /// Returns the identity that was cleared, or `None` if the request is
    /// missing or not confirmed.
    async fn cancel_confirmed(
        &self,
        token: &LinkToken,
    ) -> Result<Option<TelegramIdentity>, DomainError>;

    /// Delete the request only if it is confirmed, returning what was deleted.
    async fn consume_confirmed(
        &self,
        token: &LinkToken,
    ) -> Result<Option<LinkRequest>, DomainError>;

    /// Delete every request created before `cutoff`. Returns how many went.
    async fn delete_created_before(&self, cutoff: Timestamp) -> Result<u64, DomainError>;
}
