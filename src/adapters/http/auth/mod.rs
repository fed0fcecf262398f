//! HTTP adapter for registration and sessions.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::auth_router;
