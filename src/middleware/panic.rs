//! Converts handler panics into the JSON 500 envelope.

use crate::errors::internal_error_response;
use axum::response::Response;
use std::any::Any;

/// Response builder for `tower_http::catch_panic::CatchPanicLayer::custom`
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic message".to_string()
    };

    internal_error_response(detail)
}
