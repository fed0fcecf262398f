//! Shop list domain module.
//!
//! Items embedded in a room and the query language used to search them.

mod item;
mod query;

pub use item::{list_order, ItemPatch, NewItem, ShopListItem, Tag};
pub use query::{ItemFilter, ListQuery};
