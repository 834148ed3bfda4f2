//! Client-facing API errors.
//!
//! API error codes are a separate taxonomy from domain `ErrorCode`s. Several
//! domain conditions may surface as one API code.

use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Named error codes returned to API clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorCode {
    /// Login rejected, cause withheld.
    AuthenticationFailed,
    /// The addressed session is not the caller's active session.
    SessionNotFound,
    /// The route needs a logged-in user.
    Unauthenticated,
    /// Anything the client cannot act on.
    InternalError,
}

impl ApiErrorCode {
    /// Wire name of the code.
    pub fn name(&self) -> &'static str {
        match self {
            ApiErrorCode::AuthenticationFailed => "AUTHENTICATION_FAILED",
            ApiErrorCode::SessionNotFound => "SESSION_NOT_FOUND",
            ApiErrorCode::Unauthenticated => "UNAUTHENTICATED",
            ApiErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }

    /// HTTP status carried by responses with this code.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiErrorCode::AuthenticationFailed => StatusCode::UNAUTHORIZED,
            ApiErrorCode::SessionNotFound => StatusCode::NOT_FOUND,
            ApiErrorCode::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An error the API reports to the client by code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ApiErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn authentication_failed() -> Self {
        Self::new(ApiErrorCode::AuthenticationFailed, "Invalid name or password")
    }

    pub fn session_not_found() -> Self {
        Self::new(ApiErrorCode::SessionNotFound, "Session not found")
    }

    pub fn unauthenticated() -> Self {
        Self::new(ApiErrorCode::Unauthenticated, "Authentication required")
    }

    pub fn internal() -> Self {
        Self::new(ApiErrorCode::InternalError, "Internal server error")
    }
}

/// Standard error body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            code: err.code.name().to_string(),
            message: err.message.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(ErrorResponse::from(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_have_wire_names() {
        assert_eq!(ApiErrorCode::AuthenticationFailed.name(), "AUTHENTICATION_FAILED");
        assert_eq!(ApiErrorCode::SessionNotFound.name(), "SESSION_NOT_FOUND");
        assert_eq!(ApiErrorCode::Unauthenticated.to_string(), "UNAUTHENTICATED");
    }

    #[test]
    fn authentication_failed_maps_to_401() {
        let response = ApiError::authentication_failed().into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn session_not_found_maps_to_404() {
        let response = ApiError::session_not_found().into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn internal_maps_to_500() {
        let response = ApiError::internal().into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_display_leads_with_code() {
        let err = ApiError::authentication_failed();
        assert!(err.to_string().starts_with("AUTHENTICATION_FAILED"));
    }

    #[test]
    fn error_response_carries_code_and_message() {
        let body = ErrorResponse::from(&ApiError::session_not_found());
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            serde_json::json!({ "code": "SESSION_NOT_FOUND", "message": "Session not found" })
        );
    }
}
