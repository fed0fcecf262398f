//! RedeemInviteHandler - joins a room with an invite code.

use std::sync::Arc;

use crate::domain::foundation::{Login, RoomId};
use crate::domain::room::{InviteCode, RoomError};
use crate::ports::{InviteRepository, RoomRepository};

#[derive(Debug, Clone)]
pub struct RedeemInviteCommand {
    pub code: InviteCode,
    pub login: Login,
}

pub struct RedeemInviteHandler {
    rooms: Arc<dyn RoomRepository>,
    invites: Arc<dyn InviteRepository>,
}

impl RedeemInviteHandler {
    pub fn new(rooms: Arc<dyn RoomRepository>, invites: Arc<dyn InviteRepository>) -> Self {
        Self { rooms, invites }
    }

    pub async fn handle(&self, cmd: RedeemInviteCommand) -> Result<RoomId, RoomError> {
        let invite = self
            .invites
            .take(&cmd.code)
            .await?
            .ok_or(RoomError::InviteNotFound)?;

        if !self.rooms.add_member(&invite.room_id, &cmd.login).await? {
            return Err(RoomError::NotFound(invite.room_id));
        }

        tracing::info!(room_id = %invite.room_id, login = %cmd.login, "invite redeemed");
        Ok(invite.room_id)
    }
}
