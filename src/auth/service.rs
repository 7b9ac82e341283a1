//! Token issuance and request authorization.
//!
//! Both operations are pure functions of the user registry, the signing
//! secret, and the clock; nothing is stored per token.

use crate::auth::{
    errors::AuthError,
    jwt::JwtHandler,
    models::Role,
    user_store::UserStore,
};
use tracing::{debug, warn};

pub struct AuthService {
    users: UserStore,
    jwt: JwtHandler,
}

impl AuthService {
    pub fn new(users: UserStore, jwt: JwtHandler) -> Self {
        Self { users, jwt }
    }

    pub fn jwt(&self) -> &JwtHandler {
        &self.jwt
    }

    /// Check credentials and sign a token carrying the user's role
    pub fn issue_token(
        &self,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<String, AuthError> {
        let (username, password) = match (username, password) {
            (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => (u, p),
            _ => return Err(AuthError::MissingCredentials),
        };

        let user = self
            .users
            .verify_credentials(username, password)
            .ok_or_else(|| {
                warn!("Failed token request for user: {}", username);
                AuthError::InvalidCredentials
            })?;

        let token = self
            .jwt
            .generate_token(&user.role)
            .map_err(|e| AuthError::Internal(format!("{e:#}")))?;

        debug!("Issued token for {} ({})", user.username, user.role);
        Ok(token)
    }

    /// Validate the Authorization header value and check the role against
    /// `allowed`. An empty allow-list admits any authenticated role.
    pub fn authorize(&self, header: Option<&str>, allowed: &[Role]) -> Result<Role, AuthError> {
        let token = bearer_token(header).ok_or(AuthError::TokenMissing)?;

        let claims = self.jwt.validate_token(token).map_err(|e| {
            warn!("JWT decode error: {:#}", e);
            AuthError::TokenInvalidOrExpired
        })?;

        if !allowed.is_empty() && !allowed.contains(&claims.role) {
            debug!("Role {} not in allow-list", claims.role);
            return Err(AuthError::NotAuthorized);
        }

        Ok(claims.role)
    }
}

/// Token from an `Authorization` header value. A value without the `Bearer `
/// prefix is taken as the raw token.
pub fn bearer_token(header: Option<&str>) -> Option<&str> {
    let value = header?;
    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::{User, DELETE_ROLES, READ_ROLES, WRITE_ROLES};
    use chrono::{Duration, Utc};

    const SECRET: &str = "test-secret-key-12345";

    fn seed() -> Vec<User> {
        [
            ("admin", "admin_pass", Role::ADMIN),
            ("writer", "writer_pass", Role::WRITER),
            ("visitor", "visitor_pass", Role::VISITOR),
        ]
        .into_iter()
        .map(|(username, password, role)| User {
            username: username.to_string(),
            password: password.to_string(),
            role,
        })
        .collect()
    }

    fn create_test_service() -> AuthService {
        AuthService::new(
            UserStore::from_seed(seed()).unwrap(),
            JwtHandler::new(SECRET.to_string()),
        )
    }

    fn bearer(token: &str) -> String {
        format!("Bearer {}", token)
    }

    #[test]
    fn test_issued_token_authorizes_with_stored_role() {
        let service = create_test_service();

        for user in seed() {
            let token = service
                .issue_token(Some(user.username.as_str()), Some(user.password.as_str()))
                .unwrap();
            let role = service.authorize(Some(bearer(&token).as_str()), &[]).unwrap();
            assert_eq!(role, user.role);
        }
    }

    #[test]
    fn test_missing_credentials() {
        let service = create_test_service();

        assert_eq!(
            service.issue_token(None, Some("admin_pass")),
            Err(AuthError::MissingCredentials)
        );
        assert_eq!(
            service.issue_token(Some("admin"), Some("")),
            Err(AuthError::MissingCredentials)
        );
        assert_eq!(
            service.issue_token(Some(""), None),
            Err(AuthError::MissingCredentials)
        );
    }

    #[test]
    fn test_invalid_credentials() {
        let service = create_test_service();

        assert_eq!(
            service.issue_token(Some("admin"), Some("nope")),
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(
            service.issue_token(Some("ghost"), Some("admin_pass")),
            Err(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn test_missing_token() {
        let service = create_test_service();

        assert_eq!(service.authorize(None, READ_ROLES), Err(AuthError::TokenMissing));
        assert_eq!(
            service.authorize(Some("Bearer "), READ_ROLES),
            Err(AuthError::TokenMissing)
        );
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = create_test_service();
        let token = service
            .jwt()
            .generate_token_at(&Role::ADMIN, Utc::now() - Duration::minutes(31))
            .unwrap();

        assert_eq!(
            service.authorize(Some(bearer(&token).as_str()), READ_ROLES),
            Err(AuthError::TokenInvalidOrExpired)
        );
    }

    #[test]
    fn test_foreign_secret_rejected() {
        let service = create_test_service();
        let token = JwtHandler::new("another-secret".to_string())
            .generate_token(&Role::ADMIN)
            .unwrap();

        assert_eq!(
            service.authorize(Some(bearer(&token).as_str()), READ_ROLES),
            Err(AuthError::TokenInvalidOrExpired)
        );
        assert_eq!(
            service.authorize(Some("Bearer garbage"), READ_ROLES),
            Err(AuthError::TokenInvalidOrExpired)
        );
    }

    #[test]
    fn test_role_allow_lists() {
        let service = create_test_service();
        let writer = service
            .issue_token(Some("writer"), Some("writer_pass"))
            .unwrap();
        let admin = service
            .issue_token(Some("admin"), Some("admin_pass"))
            .unwrap();

        assert_eq!(
            service.authorize(Some(bearer(&writer).as_str()), DELETE_ROLES),
            Err(AuthError::NotAuthorized)
        );
        assert_eq!(
            service.authorize(Some(bearer(&writer).as_str()), WRITE_ROLES),
            Ok(Role::WRITER)
        );
        assert_eq!(
            service.authorize(Some(bearer(&admin).as_str()), DELETE_ROLES),
            Ok(Role::ADMIN)
        );
    }

    #[test]
    fn test_raw_token_without_prefix_accepted() {
        let service = create_test_service();
        let token = service
            .issue_token(Some("visitor"), Some("visitor_pass"))
            .unwrap();

        assert_eq!(service.authorize(Some(token.as_str()), READ_ROLES), Ok(Role::VISITOR));
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(Some("Bearer abc.def")), Some("abc.def"));
        assert_eq!(bearer_token(Some("abc.def")), Some("abc.def"));
        assert_eq!(bearer_token(Some("   ")), None);
        assert_eq!(bearer_token(None), None);
    }
}
