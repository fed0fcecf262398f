//! Telegram bot adapter.
//!
//! - `client` - Bot API calls over reqwest; implements `BotMessenger`
//! - `types` - Bot API wire types
//! - `worker` - Update dispatch and the long-poll loop

mod client;
mod types;
mod worker;

pub use client::{DisabledBotMessenger, TelegramBotClient, CANCEL_BUTTON_TEXT};
pub use types::Update;
pub use worker::{
    run_polling, BotCommandDispatcher, NOT_A_USER_TEXT, UNKNOWN_TOKEN_TEXT, WRONG_ARGUMENTS_TEXT,
};
