//! Linkage handshake command handlers.

mod begin_link;
mod cancel_link;
mod complete_registration;
mod confirm_link;
mod purge_expired_links;

pub use begin_link::BeginLinkHandler;
pub use cancel_link::{CancelLinkCommand, CancelLinkHandler, CANCELLED_TEXT};
pub use complete_registration::{
    CompleteRegistrationCommand, CompleteRegistrationHandler, CompleteRegistrationResult,
};
pub use confirm_link::{ConfirmLinkCommand, ConfirmLinkHandler, CONFIRMED_TEXT};
pub use purge_expired_links::PurgeExpiredLinksHandler;
