//! Room domain module.
//!
//! Rooms group members around a shared list. The owner manages membership
//! and invites; leaving as the owner deletes the room.

mod aggregate;
mod errors;
mod invite;

pub use aggregate::{Room, RoomSummary, MIN_ROOM_NAME_LEN};
pub use errors::RoomError;
pub use invite::{InviteCode, RoomInvite, INVITE_CODE_LEN};
