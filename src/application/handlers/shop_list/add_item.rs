//! AddItemHandler - appends an item to a room's list.

use std::sync::Arc;

use crate::application::handlers::room::require_membership;
use crate::domain::foundation::{ItemId, Login, RoomId};
use crate::domain::room::RoomError;
use crate::domain::shop_list::{NewItem, ShopListItem};
use crate::ports::RoomRepository;

#[derive(Debug, Clone)]
pub struct AddItemCommand {
    pub room_id: RoomId,
    pub login: Login,
    pub item: NewItem,
}

pub struct AddItemHandler {
    rooms: Arc<dyn RoomRepository>,
}

impl AddItemHandler {
    pub fn new(rooms: Arc<dyn RoomRepository>) -> Self {
        Self { rooms }
    }

    pub async fn handle(&self, cmd: AddItemCommand) -> Result<ItemId, RoomError> {
        require_membership(self.rooms.as_ref(), &cmd.room_id, &cmd.login).await?;
        let item = ShopListItem::from_new(ItemId::new(), cmd.item);
        self.rooms.add_item(&cmd.room_id, &item).await?;
        Ok(item.uuid)
    }
}
