//! Route configuration for shop list endpoints.

use axum::routing::{get, patch};
use axum::Router;

use crate::adapters::http::state::AppState;

use super::handlers::{add_item, edit_item, list_items, remove_item};

/// Item routes, merged into the room router under `/api/rooms`.
///
/// Routes:
/// - `GET /:room_id/items?query=` - Filtered, ordered items
/// - `POST /:room_id/items` - Add an item
/// - `PATCH /:room_id/items/:item_id` - Update provided fields
/// - `DELETE /:room_id/items/:item_id` - Remove an item
pub fn shop_list_router() -> Router<AppState> {
    Router::new()
        .route("/:room_id/items", get(list_items).post(add_item))
        .route("/:room_id/items/:item_id", patch(edit_item).delete(remove_item))
}
