//! Membership precondition shared by room and shop list handlers.

use crate::domain::foundation::{Login, RoomId};
use crate::domain::room::{Room, RoomError};
use crate::ports::RoomRepository;

/// Loads the room and checks that `login` belongs to it.
///
/// Missing room is `NotFound`; an existing room the caller is not in is
/// `Forbidden`.
pub async fn require_membership(
    rooms: &dyn RoomRepository,
    room_id: &RoomId,
    login: &Login,
) -> Result<Room, RoomError> {
    let room = require_room(rooms, room_id).await?;
    room.ensure_member(login)?;
    Ok(room)
}

pub async fn require_room(rooms: &dyn RoomRepository, room_id: &RoomId) -> Result<Room, RoomError> {
    rooms
        .find(room_id)
        .await?
        .ok_or(RoomError::NotFound(*room_id))
}
