//! Event adapters.
//!
//! - `LinkageHub` - In-process, token-scoped fan-out of linkage events

mod linkage_hub;

pub use linkage_hub::{LinkageHub, LinkageSubscription, DEFAULT_SUBSCRIBER_CAPACITY};
