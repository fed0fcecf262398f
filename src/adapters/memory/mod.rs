//! In-memory adapters.
//!
//! Back every persistence port with `tokio::sync::RwLock` maps. Used by the
//! test suite and for running the service without a database.

mod bot;
mod events;
mod link_requests;
mod rooms;
mod users;

pub use bot::RecordingBotMessenger;
pub use events::RecordingEventPublisher;
pub use link_requests::InMemoryLinkRequestRepository;
pub use rooms::InMemoryRoomRepository;
pub use users::InMemoryUserRepository;
