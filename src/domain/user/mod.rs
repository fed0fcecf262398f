//! User domain module.
//!
//! Registered accounts and their password credentials.

mod account;
mod credential;
mod errors;

pub use account::User;
pub use credential::Credential;
pub use errors::AuthFlowError;
