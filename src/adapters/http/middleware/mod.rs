//! HTTP middleware for axum.
//!
//! - `auth` - Session middleware and extractors

pub mod auth;

pub use auth::{auth_middleware, cookie_token, AuthRejection, AuthState, RequireAuth, AUTH_COOKIE};
