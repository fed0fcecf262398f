//! HTTP handlers for shop list items.

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::rooms::handlers::parse_room_id;
use crate::adapters::http::state::AppState;
use crate::adapters::http::ApiError;
use crate::application::handlers::shop_list::{
    AddItemCommand, EditItemCommand, ListItemsQuery, RemoveItemCommand,
};
use crate::domain::foundation::ItemId;
use crate::domain::shop_list::{ItemPatch, NewItem};

use super::dto::{AddItemResponse, ListItemsParams};

fn parse_item_id(raw: &str) -> Result<ItemId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request("Invalid item ID format"))
}

/// GET /api/rooms/:room_id/items?query=
pub async fn list_items(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(room_id): Path<String>,
    Query(params): Query<ListItemsParams>,
) -> Result<impl IntoResponse, ApiError> {
    let query = ListItemsQuery {
        room_id: parse_room_id(&room_id)?,
        login: user.login,
        query: params.query,
    };
    let items = state.list_items_handler().handle(query).await?;
    Ok(Json(items))
}

/// POST /api/rooms/:room_id/items
pub async fn add_item(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(room_id): Path<String>,
    Json(item): Json<NewItem>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = AddItemCommand {
        room_id: parse_room_id(&room_id)?,
        login: user.login,
        item,
    };
    let uuid = state.add_item_handler().handle(cmd).await?;
    Ok((
        StatusCode::CREATED,
        Json(AddItemResponse {
            uuid: uuid.to_string(),
        }),
    ))
}

/// PATCH /api/rooms/:room_id/items/:item_id
pub async fn edit_item(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path((room_id, item_id)): Path<(String, String)>,
    Json(patch): Json<ItemPatch>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = EditItemCommand {
        room_id: parse_room_id(&room_id)?,
        login: user.login,
        item_id: parse_item_id(&item_id)?,
        patch,
    };
    state.edit_item_handler().handle(cmd).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/rooms/:room_id/items/:item_id
pub async fn remove_item(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path((room_id, item_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = RemoveItemCommand {
        room_id: parse_room_id(&room_id)?,
        login: user.login,
        item_id: parse_item_id(&item_id)?,
    };
    state.remove_item_handler().handle(cmd).await?;
    Ok(StatusCode::NO_CONTENT)
}
