//! HTTP error mapping.
//!
//! Every module error folds into `ApiError`, which renders as
//! `{"code": "...", "message": "..."}` with a status derived from the
//! domain `ErrorCode`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ErrorCode;
use crate::domain::linkage::LinkageError;
use crate::domain::room::RoomError;
use crate::domain::user::AuthFlowError;

/// Error body returned by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn status(&self) -> StatusCode {
        status_for(self.code)
    }
}

pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
        ErrorCode::NotConfirmed | ErrorCode::ExpectationFailed => StatusCode::EXPECTATION_FAILED,
        ErrorCode::DatabaseError | ErrorCode::BotError | ErrorCode::InternalError => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            tracing::error!(code = %self.code, error = %self.message, "request failed");
            "Internal server error".to_string()
        } else {
            self.message
        };
        let body = ErrorResponse {
            code: self.code.to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

impl From<LinkageError> for ApiError {
    fn from(err: LinkageError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

impl From<RoomError> for ApiError {
    fn from(err: RoomError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

impl From<AuthFlowError> for ApiError {
    fn from(err: AuthFlowError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainError, LinkToken, RoomId};

    #[test]
    fn statuses_follow_error_codes() {
        assert_eq!(
            ApiError::from(RoomError::Forbidden).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::from(RoomError::NotFound(RoomId::new())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(LinkageError::ConfirmationMissing).status(),
            StatusCode::EXPECTATION_FAILED
        );
        assert_eq!(
            ApiError::from(LinkageError::LoginTaken("a".into())).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(RoomError::from(DomainError::conflict("Room already exists"))).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(AuthFlowError::WrongPassword).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(LinkageError::NotFound(LinkToken::generate())).status(),
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn server_errors_hide_details() {
        let response =
            ApiError::from(RoomError::Infrastructure("connection refused".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "DATABASE_ERROR");
        assert_eq!(error.message, "Internal server error");
    }
}
