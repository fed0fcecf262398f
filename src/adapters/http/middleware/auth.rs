//! Authentication middleware and extractors for axum.
//!
//! ```text
//! Request → auth_middleware → injects AuthenticatedUser into extensions
//!                                      ↓
//!                              Handler → RequireAuth extractor reads from extensions
//! ```
//!
//! The session token is read from the `AUTH_TOKEN` cookie or from an
//! `Authorization: Bearer` header. A stale cookie is ignored so the browser
//! can still reach the login endpoint; a bad Bearer token is rejected.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::ErrorResponse;
use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::SessionValidator;

/// Name of the session cookie.
pub const AUTH_COOKIE: &str = "AUTH_TOKEN";

/// Auth middleware state - wraps the session validator.
pub type AuthState = Arc<dyn SessionValidator>;

enum TokenSource<'a> {
    Bearer(&'a str),
    Cookie(&'a str),
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

/// Value of the `AUTH_TOKEN` cookie, if sent.
pub fn cookie_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == AUTH_COOKIE)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

fn token_source(headers: &HeaderMap) -> Option<TokenSource<'_>> {
    bearer_token(headers)
        .map(TokenSource::Bearer)
        .or_else(|| cookie_token(headers).map(TokenSource::Cookie))
}

/// Validates the session token, if any, and injects the user.
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let user = match token_source(request.headers()) {
        None => None,
        Some(TokenSource::Bearer(token)) => match validator.validate(token).await {
            Ok(user) => Some(user),
            Err(e) => return auth_error_response(&e),
        },
        Some(TokenSource::Cookie(token)) => match validator.validate(token).await {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::debug!(error = %e, "ignoring invalid session cookie");
                None
            }
        },
    };

    if let Some(user) = user {
        request.extensions_mut().insert(user);
    }
    next.run(request).await
}

fn auth_error_response(err: &AuthError) -> Response {
    let message = match err {
        AuthError::TokenExpired => "Token expired",
        _ => "Invalid token",
    };
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse {
            code: "UNAUTHORIZED".to_string(),
            message: message.to_string(),
        }),
    )
        .into_response()
}

/// Extractor that requires authentication.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(RequireAuth)
            .ok_or(AuthRejection::Unauthenticated)
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone)]
pub enum AuthRejection {
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse {
                    code: "UNAUTHORIZED".to_string(),
                    message: "Authentication required".to_string(),
                }),
            )
                .into_response(),
        }
    }
}
