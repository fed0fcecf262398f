//! WebSocket adapter for live linkage status.
//!
//! ```text
//! Bot worker ──confirm/cancel──► LinkageHub ──mpsc──► linkage socket ──► browser
//! ```
//!
//! - [`messages`] - Frame formatting
//! - [`handler`] - Axum upgrade handler and connection loop

pub mod handler;
pub mod messages;

pub use handler::{linkage_ws_handler, LinkageParams};
pub use messages::{linkage_frame, CANCELLED_FRAME, CONFIRMED_FRAME};
