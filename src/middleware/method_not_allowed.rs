//! JSON body for 405 responses.
//!
//! The router answers a known path with an unsupported method using an empty
//! 405. This rewrites it into the usual `{"message": ...}` envelope and keeps
//! the `Allow` header.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::errors::message_response;

pub async fn json_method_not_allowed(request: Request<Body>, next: Next) -> Response {
    let response = next.run(request).await;
    if response.status() != StatusCode::METHOD_NOT_ALLOWED {
        return response;
    }

    let (mut parts, _) = response.into_parts();
    let (json_parts, body) =
        message_response(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed").into_parts();

    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.extend(json_parts.headers);
    Response::from_parts(parts, body)
}
