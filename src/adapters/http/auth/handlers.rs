//! HTTP handlers for the auth endpoints.

use axum::extract::{Json, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::IntoResponse;

use crate::adapters::http::middleware::{RequireAuth, AUTH_COOKIE};
use crate::adapters::http::state::{AppState, CookieSettings};
use crate::adapters::http::ApiError;
use crate::application::handlers::auth::LoginCommand;
use crate::application::handlers::linkage::CompleteRegistrationCommand;

use super::dto::{
    LoginRequest, LoginResponse, MeResponse, RegisterRequest, RegisterResponse,
    TelegramTokenResponse,
};

/// POST /api/auth/telegram-token
pub async fn issue_telegram_token(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let token = state.begin_link_handler().handle().await?;
    Ok(Json(TelegramTokenResponse {
        token: token.to_string(),
    }))
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = CompleteRegistrationCommand {
        login: request.login,
        password: request.password,
        telegram_token: request.telegram_token,
    };
    let result = state.complete_registration_handler().handle(cmd).await?;

    tracing::info!(login = %result.user.login, room_id = %result.room.id(), "user registered");

    let response = RegisterResponse {
        login: result.user.login.to_string(),
        room_id: result.room.id().to_string(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = LoginCommand {
        login: request.login,
        password: request.password,
    };
    let result = state.login_handler().handle(cmd).await?;

    let cookie = session_cookie(&result.session_token, &state.cookie)?;
    let response = LoginResponse {
        login: result.login.to_string(),
        token: result.session_token,
    };
    Ok(([(header::SET_COOKIE, cookie)], Json(response)))
}

/// POST /api/auth/logout
pub async fn logout(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let cookie = expired_cookie(&state.cookie)?;
    Ok((StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie)]))
}

/// GET /api/auth/me
pub async fn me(RequireAuth(user): RequireAuth) -> impl IntoResponse {
    Json(MeResponse {
        login: user.login.to_string(),
    })
}

fn session_cookie(token: &str, settings: &CookieSettings) -> Result<HeaderValue, ApiError> {
    build_cookie(token, settings.max_age_secs, settings.secure)
}

fn expired_cookie(settings: &CookieSettings) -> Result<HeaderValue, ApiError> {
    build_cookie("", 0, settings.secure)
}

fn build_cookie(value: &str, max_age: u64, secure: bool) -> Result<HeaderValue, ApiError> {
    let mut cookie =
        format!("{AUTH_COOKIE}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}");
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie).map_err(|_| ApiError::internal("Invalid session cookie"))
}
