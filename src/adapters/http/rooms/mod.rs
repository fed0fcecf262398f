//! HTTP adapter for rooms, membership and invites.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::{invite_router, room_router};
