//! HTTP handlers for rooms, membership and invites.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::adapters::http::ApiError;
use crate::application::handlers::room::{
    CreateRoomCommand, IssueInviteCommand, LeaveOutcome, LeaveRoomCommand, RedeemInviteCommand,
    RemoveMemberCommand,
};
use crate::domain::foundation::{Login, RoomId};
use crate::domain::room::InviteCode;

use super::dto::{CreateRoomRequest, InviteResponse, RedeemInviteResponse};

/// Parses a room id path segment.
pub(crate) fn parse_room_id(raw: &str) -> Result<RoomId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request("Invalid room ID format"))
}

/// GET /api/rooms
pub async fn list_rooms(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let rooms = state.list_rooms_handler().handle(&user.login).await?;
    Ok(Json(rooms))
}

/// POST /api/rooms
pub async fn create_room(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<CreateRoomRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = CreateRoomCommand {
        owner: user.login.clone(),
        name: request.name,
    };
    let room = state.create_room_handler().handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(room.summary_for(&user.login))))
}

/// POST /api/rooms/:room_id/leave
pub async fn leave_room(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(room_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let room_id = parse_room_id(&room_id)?;
    let cmd = LeaveRoomCommand {
        room_id,
        login: user.login.clone(),
    };
    let outcome = state.leave_room_handler().handle(cmd).await?;
    if outcome == LeaveOutcome::Deleted {
        tracing::info!(%room_id, owner = %user.login, "room deleted by owner");
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/rooms/:room_id/invites
pub async fn issue_invite(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(room_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = IssueInviteCommand {
        room_id: parse_room_id(&room_id)?,
        requester: user.login,
    };
    let code = state.issue_invite_handler().handle(cmd).await?;
    Ok((
        StatusCode::CREATED,
        Json(InviteResponse {
            code: code.to_string(),
        }),
    ))
}

/// POST /api/invites/:code/redeem
pub async fn redeem_invite(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = RedeemInviteCommand {
        code: InviteCode::from_string(code),
        login: user.login,
    };
    let room_id = state.redeem_invite_handler().handle(cmd).await?;
    Ok(Json(RedeemInviteResponse {
        room_id: room_id.to_string(),
    }))
}

/// DELETE /api/rooms/:room_id/users/:login
pub async fn remove_member(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path((room_id, target)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let target = Login::new(target).map_err(|e| ApiError::bad_request(e.to_string()))?;
    let cmd = RemoveMemberCommand {
        room_id: parse_room_id(&room_id)?,
        requester: user.login,
        target,
    };
    state.remove_member_handler().handle(cmd).await?;
    Ok(StatusCode::NO_CONTENT)
}
