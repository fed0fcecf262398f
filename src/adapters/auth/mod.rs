//! Session token adapters.
//!
//! - `jwt` - HS256 tokens implementing `SessionIssuer` and `SessionValidator`

mod jwt;

pub use jwt::{JwtSessions, JwtSettings};
