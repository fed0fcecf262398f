//! EditItemHandler - merges provided fields into an item.

use std::sync::Arc;

use crate::application::handlers::room::require_membership;
use crate::domain::foundation::{ItemId, Login, RoomId};
use crate::domain::room::RoomError;
use crate::domain::shop_list::ItemPatch;
use crate::ports::RoomRepository;

#[derive(Debug, Clone)]
pub struct EditItemCommand {
    pub room_id: RoomId,
    pub login: Login,
    pub item_id: ItemId,
    pub patch: ItemPatch,
}

pub struct EditItemHandler {
    rooms: Arc<dyn RoomRepository>,
}

impl EditItemHandler {
    pub fn new(rooms: Arc<dyn RoomRepository>) -> Self {
        Self { rooms }
    }

    /// Unknown items and empty patches succeed without changing anything.
    pub async fn handle(&self, cmd: EditItemCommand) -> Result<(), RoomError> {
        require_membership(self.rooms.as_ref(), &cmd.room_id, &cmd.login).await?;
        if cmd.patch.is_empty() {
            return Ok(());
        }
        let updated = self
            .rooms
            .update_item(&cmd.room_id, &cmd.item_id, &cmd.patch)
            .await?;
        if !updated {
            tracing::debug!(room_id = %cmd.room_id, item_id = %cmd.item_id, "edit of unknown item ignored");
        }
        Ok(())
    }
}
