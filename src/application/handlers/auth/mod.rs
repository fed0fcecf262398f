//! Session command handlers.

mod login;

pub use login::{LoginCommand, LoginHandler, LoginResult, LOGIN_NOTICE_TEXT};
