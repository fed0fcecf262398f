//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `linkage` - Telegram account linkage handshake
//! - `room` - Rooms, membership and invites
//! - `shop_list` - Shared list items and the filter language
//! - `user` - Registered users and credentials

pub mod foundation;
pub mod linkage;
pub mod room;
pub mod shop_list;
pub mod user;
