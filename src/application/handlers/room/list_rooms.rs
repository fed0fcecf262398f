//! ListRoomsHandler - rooms the caller belongs to.

use std::sync::Arc;

use crate::domain::foundation::Login;
use crate::domain::room::{RoomError, RoomSummary};
use crate::ports::RoomRepository;

pub struct ListRoomsHandler {
    rooms: Arc<dyn RoomRepository>,
}

impl ListRoomsHandler {
    pub fn new(rooms: Arc<dyn RoomRepository>) -> Self {
        Self { rooms }
    }

    pub async fn handle(&self, login: &Login) -> Result<Vec<RoomSummary>, RoomError> {
        let rooms = self.rooms.list_for_member(login).await?;
        Ok(rooms.iter().map(|r| r.summary_for(login)).collect())
    }
}
