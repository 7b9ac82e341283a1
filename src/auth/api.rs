//! Authentication API Endpoints
//! `POST /token`: exchange username/password for a signed access token.

use crate::auth::{
    errors::AuthError,
    models::{TokenRequest, TokenResponse},
    service::AuthService,
};
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Token endpoint - POST /token
pub async fn issue_token(
    State(auth): State<Arc<AuthService>>,
    payload: Result<Json<TokenRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, AuthError> {
    // A body that is not a JSON object carries no credentials
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            debug!("Token request body rejected: {}", rejection.body_text());
            TokenRequest::default()
        }
    };

    let (username, password) = payload.credentials().map_err(|err| {
        if err == AuthError::InvalidCredentials {
            warn!("Token request with non-string credentials");
        }
        err
    })?;
    let token = auth.issue_token(Some(username), Some(password))?;

    info!("Token issued: {}", username);

    Ok(Json(TokenResponse { token }))
}
