//! Route configuration for auth endpoints.

use axum::routing::{get, post};
use axum::Router;

use crate::adapters::http::state::AppState;
use crate::adapters::websocket::linkage_ws_handler;

use super::handlers::{issue_telegram_token, login, logout, me, register};

/// Creates the auth router, mounted at `/api/auth`.
///
/// Routes:
/// - `POST /telegram-token` - Start a Telegram linkage
/// - `GET /telegram-linkage?token=` - WebSocket stream of linkage events
/// - `POST /register` - Finish registration with a confirmed token
/// - `POST /login` - Sets the session cookie
/// - `POST /logout` - Clears the session cookie
/// - `GET /me` - Current session
pub fn auth_router() -> Router<AppState> {
    Router::new()
        .route("/telegram-token", post(issue_telegram_token))
        .route("/telegram-linkage", get(linkage_ws_handler))
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
}
