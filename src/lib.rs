//! Money Manage - shared shopping-list rooms with Telegram-linked accounts
//!
//! Users register by confirming a one-time token through a Telegram bot,
//! then share shopping lists inside rooms they own or were invited to.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
