//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod auth;
pub mod linkage;
pub mod room;
pub mod shop_list;
