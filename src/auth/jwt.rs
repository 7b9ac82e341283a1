//! JWT Token Handler
//! Signs and validates HS256 tokens carrying a role and an expiry.

use crate::auth::models::{Claims, Role};
use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;

/// Default token lifetime
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 30;

/// JWT Handler for token operations
pub struct JwtHandler {
    secret: String,
    expiration: Duration,
}

impl JwtHandler {
    /// Create a new JWT handler with the default 30 minute lifetime
    pub fn new(secret: String) -> Self {
        Self::with_ttl_minutes(secret, DEFAULT_TOKEN_TTL_MINUTES)
    }

    pub fn with_ttl_minutes(secret: String, ttl_minutes: i64) -> Self {
        Self {
            secret,
            expiration: Duration::minutes(ttl_minutes),
        }
    }

    pub fn expiration(&self) -> Duration {
        self.expiration
    }

    /// Generate a token for `role`, expiring one lifetime from now
    pub fn generate_token(&self, role: &Role) -> Result<String> {
        self.generate_token_at(role, Utc::now())
    }

    /// Generate a token as if issued at `issued_at`
    pub fn generate_token_at(&self, role: &Role, issued_at: DateTime<Utc>) -> Result<String> {
        let exp = issued_at
            .checked_add_signed(self.expiration)
            .context("Invalid timestamp")?
            .timestamp();
        let exp = usize::try_from(exp).context("Token expiry before the epoch")?;

        let claims = Claims {
            role: role.clone(),
            exp,
        };

        debug!(role = %role, exp, "Generating JWT");

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .context("Failed to generate JWT")
    }

    /// Validate signature and expiry, returning the claims
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        // An expiry in the past is rejected outright.
        validation.leeway = 0;

        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .context("Invalid or expired token")?;

        debug!(role = %decoded.claims.role, "JWT token decoded successfully");

        Ok(decoded.claims)
    }
}
