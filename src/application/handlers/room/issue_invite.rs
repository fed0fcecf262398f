//! IssueInviteHandler - the owner mints a single-use invite code.

use std::sync::Arc;

use super::access::require_room;
use crate::domain::foundation::{Login, RoomId};
use crate::domain::room::{InviteCode, RoomError, RoomInvite};
use crate::ports::{InviteRepository, RoomRepository};

#[derive(Debug, Clone)]
pub struct IssueInviteCommand {
    pub room_id: RoomId,
    pub requester: Login,
}

pub struct IssueInviteHandler {
    rooms: Arc<dyn RoomRepository>,
    invites: Arc<dyn InviteRepository>,
}

impl IssueInviteHandler {
    pub fn new(rooms: Arc<dyn RoomRepository>, invites: Arc<dyn InviteRepository>) -> Self {
        Self { rooms, invites }
    }

    pub async fn handle(&self, cmd: IssueInviteCommand) -> Result<InviteCode, RoomError> {
        let room = require_room(self.rooms.as_ref(), &cmd.room_id).await?;
        room.ensure_owner(&cmd.requester)?;

        let invite = RoomInvite::new(room.id());
        self.invites.insert(&invite).await?;
        tracing::debug!(room_id = %room.id(), "invite issued");
        Ok(invite.code)
    }
}
