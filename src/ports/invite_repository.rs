//! Invite repository port.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::room::{InviteCode, RoomInvite};

#[async_trait]
pub trait InviteRepository: Send + Sync {
    async fn insert(&self, invite: &RoomInvite) -> Result<(), DomainError>;

    /// Atomically remove and return the invite, so a code redeems once.
    async fn take(&self, code: &InviteCode) -> Result<Option<RoomInvite>, DomainError>;
}
