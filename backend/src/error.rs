//! Unified error handling for the backend API.
//!
//! This module provides a centralized error type that implements `IntoResponse`,
//! allowing handlers to use `?` naturally while returning the stable
//! `{code, message}` error body callers depend on.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::auth::AuthFailure;

/// API error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: &'static str,
    pub message: String,
}

/// Unified error type for API handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Bearer-token authentication failed
    #[error(transparent)]
    Auth(#[from] AuthFailure),

    /// The OAuth provider rejected the presented token
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Generic database/anyhow error
    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::Auth(failure) => return failure.into_response(),
            ApiError::AuthenticationFailed(msg) => {
                tracing::warn!("OAuth authentication failed: {}", msg);
                (StatusCode::UNAUTHORIZED, "authentication_failed", msg)
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "server_error",
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse { code, message });

        (status, body).into_response()
    }
}

impl IntoResponse for AuthFailure {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AuthFailure::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "missing_token",
                "No bearer token was provided".to_string(),
            ),
            AuthFailure::InvalidToken(ref reason) => {
                tracing::warn!("Invalid token received: {}", reason);
                (
                    StatusCode::UNAUTHORIZED,
                    "invalid_token",
                    "The provided token is invalid".to_string(),
                )
            }
            AuthFailure::ExpiredToken => (
                StatusCode::UNAUTHORIZED,
                "expired_token",
                "The provided token has expired".to_string(),
            ),
            AuthFailure::MalformedClaims => (
                StatusCode::UNAUTHORIZED,
                "malformed_claims",
                "The token claims do not carry a usable email".to_string(),
            ),
            AuthFailure::UserNotFound(ref email) => {
                tracing::warn!("User not found for email: {}", email);
                (
                    StatusCode::NOT_FOUND,
                    "user_not_found",
                    "User not found".to_string(),
                )
            }
            AuthFailure::Directory(e) => {
                tracing::error!("User directory lookup failed: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "server_error",
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse { code, message });

        (status, body).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
