//! Shop list command and query handlers.
//!
//! Every handler first checks that the caller is a member of the room.

mod add_item;
mod edit_item;
mod list_items;
mod remove_item;

pub use add_item::{AddItemCommand, AddItemHandler};
pub use edit_item::{EditItemCommand, EditItemHandler};
pub use list_items::{ListItemsHandler, ListItemsQuery};
pub use remove_item::{RemoveItemCommand, RemoveItemHandler};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryRoomRepository;
    use crate::domain::foundation::{ItemId, Login, RoomId};
    use crate::domain::room::{Room, RoomError};
    use crate::domain::shop_list::{ItemPatch, NewItem};
    use crate::ports::RoomRepository;
    use std::sync::Arc;

    fn login(s: &str) -> Login {
        Login::new(s).unwrap()
    }

    struct Fixture {
        room: Room,
        list: ListItemsHandler,
        add: AddItemHandler,
        edit: EditItemHandler,
        remove: RemoveItemHandler,
    }

    async fn fixture() -> Fixture {
        let repo = Arc::new(InMemoryRoomRepository::new());
        let room = Room::create(login("alice"), "Groceries").unwrap();
        repo.insert(&room).await.unwrap();
        Fixture {
            room,
            list: ListItemsHandler::new(repo.clone()),
            add: AddItemHandler::new(repo.clone()),
            edit: EditItemHandler::new(repo.clone()),
            remove: RemoveItemHandler::new(repo),
        }
    }

    fn new_item(name: &str, price: f64, checked: bool) -> NewItem {
        NewItem {
            name: Some(name.to_string()),
            price: Some(price),
            checked: Some(checked),
            ..Default::default()
        }
    }

    impl Fixture {
        async fn add(&self, item: NewItem) -> ItemId {
            self.add
                .handle(AddItemCommand {
                    room_id: self.room.id(),
                    login: login("alice"),
                    item,
                })
                .await
                .unwrap()
        }

        async fn names(&self, query: Option<&str>) -> Vec<String> {
            self.list
                .handle(ListItemsQuery {
                    room_id: self.room.id(),
                    login: login("alice"),
                    query: query.map(str::to_string),
                })
                .await
                .unwrap()
                .into_iter()
                .map(|i| i.name.unwrap_or_default())
                .collect()
        }
    }

    #[tokio::test]
    async fn items_come_back_filtered_and_sorted() {
        let f = fixture().await;
        f.add(new_item("milk", 1.5, false)).await;
        f.add(new_item("bread", 2.0, true)).await;
        f.add(new_item("apples", 3.0, false)).await;

        assert_eq!(f.names(None).await, vec!["apples", "milk", "bread"]);
        assert_eq!(f.names(Some("checked:false;")).await, vec!["apples", "milk"]);
        assert_eq!(f.names(Some("price:1..2;")).await, vec!["milk", "bread"]);
        assert_eq!(f.names(Some("ap")).await, vec!["apples"]);
    }

    #[tokio::test]
    async fn edit_merges_only_given_fields() {
        let f = fixture().await;
        let id = f.add(new_item("milk", 1.5, false)).await;

        f.edit
            .handle(EditItemCommand {
                room_id: f.room.id(),
                login: login("alice"),
                item_id: id,
                patch: ItemPatch {
                    checked: Some(true),
                    ..Default::default()
                },
            })
            .await
            .unwrap();

        let items = f
            .list
            .handle(ListItemsQuery {
                room_id: f.room.id(),
                login: login("alice"),
                query: None,
            })
            .await
            .unwrap();
        assert_eq!(items[0].name.as_deref(), Some("milk"));
        assert_eq!(items[0].price, Some(1.5));
        assert_eq!(items[0].checked, Some(true));
    }

    #[tokio::test]
    async fn edit_and_remove_of_unknown_item_succeed() {
        let f = fixture().await;
        f.add(new_item("milk", 1.5, false)).await;

        let edited = f
            .edit
            .handle(EditItemCommand {
                room_id: f.room.id(),
                login: login("alice"),
                item_id: ItemId::new(),
                patch: ItemPatch {
                    name: Some("x".into()),
                    ..Default::default()
                },
            })
            .await;
        let removed = f
            .remove
            .handle(RemoveItemCommand {
                room_id: f.room.id(),
                login: login("alice"),
                item_id: ItemId::new(),
            })
            .await;

        assert!(edited.is_ok());
        assert!(removed.is_ok());
        assert_eq!(f.names(None).await, vec!["milk"]);
    }

    #[tokio::test]
    async fn remove_deletes_by_id() {
        let f = fixture().await;
        let id = f.add(new_item("milk", 1.5, false)).await;
        f.add(new_item("bread", 1.0, false)).await;

        f.remove
            .handle(RemoveItemCommand {
                room_id: f.room.id(),
                login: login("alice"),
                item_id: id,
            })
            .await
            .unwrap();

        assert_eq!(f.names(None).await, vec!["bread"]);
    }

    #[tokio::test]
    async fn outsiders_are_forbidden_and_missing_rooms_not_found() {
        let f = fixture().await;

        let outsider = f
            .list
            .handle(ListItemsQuery {
                room_id: f.room.id(),
                login: login("mallory"),
                query: None,
            })
            .await;
        let missing_id = RoomId::new();
        let missing = f
            .list
            .handle(ListItemsQuery {
                room_id: missing_id,
                login: login("alice"),
                query: None,
            })
            .await;

        assert_eq!(outsider.unwrap_err(), RoomError::Forbidden);
        assert_eq!(missing.unwrap_err(), RoomError::NotFound(missing_id));
    }
}
