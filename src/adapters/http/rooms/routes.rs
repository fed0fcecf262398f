//! Route configuration for room endpoints.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::adapters::http::state::AppState;

use super::handlers::{create_room, issue_invite, leave_room, list_rooms, redeem_invite, remove_member};

/// Creates the room router, mounted at `/api/rooms`.
///
/// Routes:
/// - `GET /` - Rooms the caller belongs to
/// - `POST /` - Create a room
/// - `POST /:room_id/leave` - Leave (owner: delete) a room
/// - `POST /:room_id/invites` - Issue an invite code (owner only)
/// - `DELETE /:room_id/users/:login` - Remove a member (owner only)
pub fn room_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_rooms).post(create_room))
        .route("/:room_id/leave", post(leave_room))
        .route("/:room_id/invites", post(issue_invite))
        .route("/:room_id/users/:login", delete(remove_member))
}

/// Creates the invite router, mounted at `/api/invites`.
pub fn invite_router() -> Router<AppState> {
    Router::new().route("/:code/redeem", post(redeem_invite))
}
