//! LeaveRoomHandler - a member leaves; the owner leaving deletes the room.

use std::sync::Arc;

use super::access::require_room;
use crate::domain::foundation::{Login, RoomId};
use crate::domain::room::RoomError;
use crate::ports::RoomRepository;

#[derive(Debug, Clone)]
pub struct LeaveRoomCommand {
    pub room_id: RoomId,
    pub login: Login,
}

/// What leaving did to the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveOutcome {
    Left,
    Deleted,
}

pub struct LeaveRoomHandler {
    rooms: Arc<dyn RoomRepository>,
}

impl LeaveRoomHandler {
    pub fn new(rooms: Arc<dyn RoomRepository>) -> Self {
        Self { rooms }
    }

    pub async fn handle(&self, cmd: LeaveRoomCommand) -> Result<LeaveOutcome, RoomError> {
        let room = require_room(self.rooms.as_ref(), &cmd.room_id).await?;

        if room.is_owner(&cmd.login) {
            self.rooms.delete(&cmd.room_id).await?;
            tracing::info!(room_id = %cmd.room_id, "owner left, room deleted");
            return Ok(LeaveOutcome::Deleted);
        }

        self.rooms.remove_member(&cmd.room_id, &cmd.login).await?;
        Ok(LeaveOutcome::Left)
    }
}
