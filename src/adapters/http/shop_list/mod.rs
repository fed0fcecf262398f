//! HTTP adapter for shop list items.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::shop_list_router;
