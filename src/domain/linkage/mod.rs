//! Linkage domain module.
//!
//! Ties a web registration attempt to a Telegram account through a
//! short-lived token that the bot user confirms or cancels.

mod errors;
mod events;
mod link_request;

pub use errors::LinkageError;
pub use events::LinkageEvent;
pub use link_request::{LinkRequest, LinkState, TelegramIdentity};
