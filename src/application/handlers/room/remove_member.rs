//! RemoveMemberHandler - the owner removes someone from the room.

use std::sync::Arc;

use super::access::require_room;
use crate::domain::foundation::{Login, RoomId};
use crate::domain::room::RoomError;
use crate::ports::RoomRepository;

#[derive(Debug, Clone)]
pub struct RemoveMemberCommand {
    pub room_id: RoomId,
    pub requester: Login,
    pub target: Login,
}

pub struct RemoveMemberHandler {
    rooms: Arc<dyn RoomRepository>,
}

impl RemoveMemberHandler {
    pub fn new(rooms: Arc<dyn RoomRepository>) -> Self {
        Self { rooms }
    }

    pub async fn handle(&self, cmd: RemoveMemberCommand) -> Result<(), RoomError> {
        let room = require_room(self.rooms.as_ref(), &cmd.room_id).await?;
        room.ensure_owner(&cmd.requester)?;
        if cmd.target == cmd.requester {
            return Err(RoomError::CannotRemoveOwner);
        }

        self.rooms.remove_member(&cmd.room_id, &cmd.target).await?;
        tracing::info!(room_id = %cmd.room_id, target = %cmd.target, "member removed");
        Ok(())
    }
}
