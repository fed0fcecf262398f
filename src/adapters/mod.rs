//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - JWT session tokens
//! - `events` - Realtime linkage hub
//! - `http` - axum REST API
//! - `memory` - In-memory repositories and recording test doubles
//! - `postgres` - PostgreSQL repositories
//! - `telegram` - Bot API client and long-poll worker
//! - `websocket` - Linkage event stream

pub mod auth;
pub mod events;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod telegram;
pub mod websocket;
