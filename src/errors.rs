//! JSON error envelopes shared by every route.
//!
//! Client errors render as `{"message": ...}`; unexpected failures render as
//! `{"message": "Internal Server Error", "error": ...}` with status 500.

use crate::store::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt::Display;
use tracing::error;

pub fn message_response(status: StatusCode, message: impl Into<String>) -> Response {
    let body = Json(json!({ "message": message.into() }));
    (status, body).into_response()
}

pub fn internal_error_response(detail: impl Display) -> Response {
    let detail = detail.to_string();
    error!("Internal error: {}", detail);

    let body = Json(json!({
        "message": "Internal Server Error",
        "error": detail,
    }));
    (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
}

/// Errors raised by the project handlers
#[derive(Debug)]
pub enum ApiError {
    Store(StoreError),
    /// Path segment that cannot name a project
    NotFound,
    /// Request body could not be read as a JSON object
    BadRequest(String),
    Internal(anyhow::Error),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Store(err)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Store(err @ StoreError::InvalidRange) => {
                message_response(StatusCode::BAD_REQUEST, err.to_string())
            }
            ApiError::Store(err @ StoreError::NotFound(_)) => {
                message_response(StatusCode::NOT_FOUND, err.to_string())
            }
            ApiError::NotFound => message_response(StatusCode::NOT_FOUND, "Project not found"),
            ApiError::BadRequest(message) => message_response(StatusCode::BAD_REQUEST, message),
            ApiError::Internal(err) => internal_error_response(format!("{err:#}")),
        }
    }
}
