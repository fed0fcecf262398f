//! Room repository port.
//!
//! Rooms own their shop list, so item operations live here too and are
//! always scoped to a room id.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ItemId, Login, RoomId};
use crate::domain::room::Room;
use crate::domain::shop_list::{ItemPatch, ListQuery, ShopListItem};

#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Persist a new room with an empty list.
    async fn insert(&self, room: &Room) -> Result<(), DomainError>;

    async fn find(&self, id: &RoomId) -> Result<Option<Room>, DomainError>;

    /// Rooms where `login` is a member.
    async fn list_for_member(&self, login: &Login) -> Result<Vec<Room>, DomainError>;

    /// Whether any room `login` belongs to is called exactly `name`.
    async fn member_has_room_named(&self, login: &Login, name: &str)
        -> Result<bool, DomainError>;

    /// Delete a room with its items and invites.
    async fn delete(&self, id: &RoomId) -> Result<(), DomainError>;

    /// Add a member if absent. Returns `false` if the room does not exist.
    async fn add_member(&self, id: &RoomId, login: &Login) -> Result<bool, DomainError>;

    /// Remove a member if present.
    async fn remove_member(&self, id: &RoomId, login: &Login) -> Result<(), DomainError>;

    /// Items matching `query`, in list order.
    async fn list_items(
        &self,
        id: &RoomId,
        query: &ListQuery,
    ) -> Result<Vec<ShopListItem>, DomainError>;

    async fn add_item(&self, id: &RoomId, item: &ShopListItem) -> Result<(), DomainError>;

    /// Apply `patch` to the item. Returns `false` if the item does not exist.
    async fn update_item(
        &self,
        id: &RoomId,
        item_id: &ItemId,
        patch: &ItemPatch,
    ) -> Result<bool, DomainError>;

    /// Remove the item. Returns `false` if it did not exist.
    async fn remove_item(&self, id: &RoomId, item_id: &ItemId) -> Result<bool, DomainError>;
}
