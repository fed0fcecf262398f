//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `LinkRequestRepository` - Pending Telegram linkages
//! - `UserRepository` - Registered users
//! - `RoomRepository` - Rooms, membership and shop list items
//! - `InviteRepository` - Single-use room invites
//!
//! ## Messaging Ports
//!
//! - `BotMessenger` - Outbound Telegram messages
//! - `EventPublisher` - Live linkage event fan-out
//!
//! ## Session Ports
//!
//! - `SessionValidator` / `SessionIssuer` - Session tokens

mod bot_messenger;
mod event_publisher;
mod invite_repository;
mod link_request_repository;
mod room_repository;
mod session_validator;
mod user_repository;

pub use bot_messenger::{BotMessenger, OutgoingMessage};
pub use event_publisher::EventPublisher;
pub use invite_repository::InviteRepository;
pub use link_request_repository::LinkRequestRepository;
pub use room_repository::RoomRepository;
pub use session_validator::{SessionIssuer, SessionValidator};
pub use user_repository::UserRepository;
