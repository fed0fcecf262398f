//! HTTP adapters - REST API and WebSocket surface.
//!
//! Each domain module has its own HTTP adapter for endpoint exposure. All
//! of them share `AppState` and are mounted under `/api` by `app_router`.

pub mod auth;
pub mod error;
pub mod middleware;
pub mod rooms;
pub mod shop_list;
pub mod state;

use axum::routing::get;
use axum::Router;

pub use error::{ApiError, ErrorResponse};
pub use state::{AppState, CookieSettings};

/// Builds the complete application router.
///
/// The auth middleware runs on every route; endpoints that need a session
/// use the `RequireAuth` extractor.
pub fn app_router(state: AppState) -> Router {
    let api = Router::new()
        .nest("/auth", auth::auth_router())
        .nest(
            "/rooms",
            rooms::room_router().merge(shop_list::shop_list_router()),
        )
        .nest("/invites", rooms::invite_router());

    Router::new()
        .nest("/api", api)
        .route("/health", get(health))
        .layer(axum::middleware::from_fn_with_state(
            state.session_validator.clone(),
            middleware::auth_middleware,
        ))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
