//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types that form the
//! vocabulary of the rooms and account-linkage domains.

mod auth;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ItemId, LinkToken, Login, RoomId, MIN_LOGIN_LENGTH};
pub use timestamp::Timestamp;
