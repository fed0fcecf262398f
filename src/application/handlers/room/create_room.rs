//! CreateRoomHandler - a member opens a new room.

use std::sync::Arc;

use crate::domain::foundation::Login;
use crate::domain::room::{Room, RoomError};
use crate::ports::RoomRepository;

#[derive(Debug, Clone)]
pub struct CreateRoomCommand {
    pub owner: Login,
    pub name: String,
}

pub struct CreateRoomHandler {
    rooms: Arc<dyn RoomRepository>,
}

impl CreateRoomHandler {
    pub fn new(rooms: Arc<dyn RoomRepository>) -> Self {
        Self { rooms }
    }

    pub async fn handle(&self, cmd: CreateRoomCommand) -> Result<Room, RoomError> {
        let room = Room::create(cmd.owner, cmd.name)?;

        // Check-then-insert: two concurrent creates can both pass
        if self
            .rooms
            .member_has_room_named(room.owner(), room.name())
            .await?
        {
            return Err(RoomError::DuplicateName(room.name().to_string()));
        }

        self.rooms.insert(&room).await?;
        tracing::info!(room_id = %room.id(), owner = %room.owner(), "room created");
        Ok(room)
    }
}
