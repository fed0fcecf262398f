//! In-memory room, shop list and invite store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ItemId, Login, RoomId};
use crate::domain::room::{InviteCode, Room, RoomInvite};
use crate::domain::shop_list::{ItemPatch, ListQuery, ShopListItem};
use crate::ports::{InviteRepository, RoomRepository};

#[derive(Debug, Clone)]
struct RoomRecord {
    room: Room,
    items: Vec<ShopListItem>,
}

#[derive(Debug, Default)]
struct State {
    rooms: HashMap<RoomId, RoomRecord>,
    invites: HashMap<InviteCode, RoomInvite>,
}

/// Rooms and invites share one lock so deleting a room also drops its
/// invites, as the foreign keys do in PostgreSQL.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRoomRepository {
    state: Arc<RwLock<State>>,
}

impl InMemoryRoomRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pending invites (for tests).
    pub async fn invite_count(&self) -> usize {
        self.state.read().await.invites.len()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn insert(&self, room: &Room) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if state.rooms.contains_key(&room.id()) {
            return Err(DomainError::conflict(room.id().to_string()));
        }
        state.rooms.insert(
            room.id(),
            RoomRecord {
                room: room.clone(),
                items: Vec::new(),
            },
        );
        Ok(())
    }

    async fn find(&self, id: &RoomId) -> Result<Option<Room>, DomainError> {
        Ok(self.state.read().await.rooms.get(id).map(|r| r.room.clone()))
    }

    async fn list_for_member(&self, login: &Login) -> Result<Vec<Room>, DomainError> {
        Ok(self
            .state
            .read()
            .await
            .rooms
            .values()
            .filter(|r| r.room.is_member(login))
            .map(|r| r.room.clone())
            .collect())
    }

    async fn member_has_room_named(
        &self,
        login: &Login,
        name: &str,
    ) -> Result<bool, DomainError> {
        Ok(self
            .state
            .read()
            .await
            .rooms
            .values()
            .any(|r| r.room.is_member(login) && r.room.name() == name))
    }

    async fn delete(&self, id: &RoomId) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        state.rooms.remove(id);
        state.invites.retain(|_, invite| &invite.room_id != id);
        Ok(())
    }

    async fn add_member(&self, id: &RoomId, login: &Login) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        match state.rooms.get_mut(id) {
            Some(record) => {
                record.room.add_member(login.clone());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove_member(&self, id: &RoomId, login: &Login) -> Result<(), DomainError> {
        if let Some(record) = self.state.write().await.rooms.get_mut(id) {
            record.room.remove_member(login);
        }
        Ok(())
    }

    async fn list_items(
        &self,
        id: &RoomId,
        query: &ListQuery,
    ) -> Result<Vec<ShopListItem>, DomainError> {
        let items = self
            .state
            .read()
            .await
            .rooms
            .get(id)
            .map(|r| r.items.clone())
            .unwrap_or_default();
        Ok(query.evaluate(items))
    }

    async fn add_item(&self, id: &RoomId, item: &ShopListItem) -> Result<(), DomainError> {
        if let Some(record) = self.state.write().await.rooms.get_mut(id) {
            if !record.items.iter().any(|i| i.uuid == item.uuid) {
                record.items.push(item.clone());
            }
        }
        Ok(())
    }

    async fn update_item(
        &self,
        id: &RoomId,
        item_id: &ItemId,
        patch: &ItemPatch,
    ) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        let item = state
            .rooms
            .get_mut(id)
            .and_then(|r| r.items.iter_mut().find(|i| &i.uuid == item_id));
        match item {
            Some(item) => {
                patch.apply_to(item);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove_item(&self, id: &RoomId, item_id: &ItemId) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        match state.rooms.get_mut(id) {
            Some(record) => {
                let before = record.items.len();
                record.items.retain(|i| &i.uuid != item_id);
                Ok(record.items.len() != before)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl InviteRepository for InMemoryRoomRepository {
    async fn insert(&self, invite: &RoomInvite) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if state.invites.contains_key(&invite.code) {
            return Err(DomainError::conflict(invite.code.as_str()));
        }
        state.invites.insert(invite.code.clone(), invite.clone());
        Ok(())
    }

    async fn take(&self, code: &InviteCode) -> Result<Option<RoomInvite>, DomainError> {
        Ok(self.state.write().await.invites.remove(code))
    }
}
