//! Auth error types and their HTTP mapping

use crate::errors::{internal_error_response, message_response};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Username or password absent or empty
    MissingCredentials,
    InvalidCredentials,
    TokenMissing,
    /// Bad signature, malformed payload, or expired
    TokenInvalidOrExpired,
    /// Valid token whose role is not on the route's allow-list
    NotAuthorized,
    Internal(String),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::MissingCredentials => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials
            | AuthError::TokenMissing
            | AuthError::TokenInvalidOrExpired => StatusCode::UNAUTHORIZED,
            AuthError::NotAuthorized => StatusCode::FORBIDDEN,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::MissingCredentials => write!(f, "Username and password required"),
            AuthError::InvalidCredentials => write!(f, "Invalid credentials"),
            AuthError::TokenMissing => write!(f, "Token is missing!"),
            AuthError::TokenInvalidOrExpired => write!(f, "Token is invalid or expired!"),
            AuthError::NotAuthorized => write!(f, "Not authorized!"),
            AuthError::Internal(detail) => write!(f, "Internal auth error: {}", detail),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::Internal(detail) => internal_error_response(detail),
            other => message_response(other.status(), other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_responses() {
        let cases = [
            (AuthError::MissingCredentials, StatusCode::BAD_REQUEST),
            (AuthError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AuthError::TokenMissing, StatusCode::UNAUTHORIZED),
            (AuthError::TokenInvalidOrExpired, StatusCode::UNAUTHORIZED),
            (AuthError::NotAuthorized, StatusCode::FORBIDDEN),
            (
                AuthError::Internal("bad key".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[tokio::test]
    async fn test_error_body_has_message() {
        let response = AuthError::NotAuthorized.into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["message"], "Not authorized!");
    }
}
