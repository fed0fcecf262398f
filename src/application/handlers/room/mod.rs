//! Room and membership command handlers.

mod access;
mod create_room;
mod issue_invite;
mod leave_room;
mod list_rooms;
mod redeem_invite;
mod remove_member;

pub use access::{require_membership, require_room};
pub use create_room::{CreateRoomCommand, CreateRoomHandler};
pub use issue_invite::{IssueInviteCommand, IssueInviteHandler};
pub use leave_room::{LeaveOutcome, LeaveRoomCommand, LeaveRoomHandler};
pub use list_rooms::ListRoomsHandler;
pub use redeem_invite::{RedeemInviteCommand, RedeemInviteHandler};
pub use remove_member::{RemoveMemberCommand, RemoveMemberHandler};
