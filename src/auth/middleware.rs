//! Authentication Middleware
//! Per-route role gate: validates the bearer token and checks the role
//! against the route's allow-list before the handler runs.

use crate::auth::{errors::AuthError, models::Role, service::AuthService};
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Middleware state: the auth service plus the roles one route group admits
#[derive(Clone)]
pub struct RoleGate {
    auth: Arc<AuthService>,
    allowed: &'static [Role],
}

impl RoleGate {
    pub fn new(auth: Arc<AuthService>, allowed: &'static [Role]) -> Self {
        Self { auth, allowed }
    }
}

/// Auth middleware that validates JWT tokens and enforces the gate's roles
pub async fn auth_middleware(
    State(gate): State<RoleGate>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let header = match req.headers().get(AUTHORIZATION) {
        Some(value) => Some(
            value
                .to_str()
                .map_err(|_| AuthError::TokenInvalidOrExpired)?,
        ),
        None => None,
    };

    let role = gate.auth.authorize(header, gate.allowed)?;

    // Handlers can pick the role up as Extension<Role>
    req.extensions_mut().insert(role);

    Ok(next.run(req).await)
}
