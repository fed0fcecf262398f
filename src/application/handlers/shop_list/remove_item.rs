//! RemoveItemHandler - drops an item from a room's list.

use std::sync::Arc;

use crate::application::handlers::room::require_membership;
use crate::domain::foundation::{ItemId, Login, RoomId};
use crate::domain::room::RoomError;
use crate::ports::RoomRepository;

#[derive(Debug, Clone)]
pub struct RemoveItemCommand {
    pub room_id: RoomId,
    pub login: Login,
    pub item_id: ItemId,
}

pub struct RemoveItemHandler {
    rooms: Arc<dyn RoomRepository>,
}

impl RemoveItemHandler {
    pub fn new(rooms: Arc<dyn RoomRepository>) -> Self {
        Self { rooms }
    }

    pub async fn handle(&self, cmd: RemoveItemCommand) -> Result<(), RoomError> {
        require_membership(self.rooms.as_ref(), &cmd.room_id, &cmd.login).await?;
        self.rooms.remove_item(&cmd.room_id, &cmd.item_id).await?;
        Ok(())
    }
}
