//! ListItemsHandler - runs a list query over a room's items.

use std::sync::Arc;

use crate::application::handlers::room::require_membership;
use crate::domain::foundation::{Login, RoomId};
use crate::domain::room::RoomError;
use crate::domain::shop_list::{ListQuery, ShopListItem};
use crate::ports::RoomRepository;

#[derive(Debug, Clone)]
pub struct ListItemsQuery {
    pub room_id: RoomId,
    pub login: Login,
    /// Raw filter text; `None` or blank lists everything.
    pub query: Option<String>,
}

pub struct ListItemsHandler {
    rooms: Arc<dyn RoomRepository>,
}

impl ListItemsHandler {
    pub fn new(rooms: Arc<dyn RoomRepository>) -> Self {
        Self { rooms }
    }

    pub async fn handle(&self, query: ListItemsQuery) -> Result<Vec<ShopListItem>, RoomError> {
        require_membership(self.rooms.as_ref(), &query.room_id, &query.login).await?;
        let compiled = query
            .query
            .as_deref()
            .map(ListQuery::parse)
            .unwrap_or_default();
        Ok(self.rooms.list_items(&query.room_id, &compiled).await?)
    }
}
