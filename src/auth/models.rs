//! Authentication Models
//! Users, roles, token claims, and the `/token` request/response bodies.

use crate::auth::errors::AuthError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;

/// Seeded user account. Passwords are compared verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub role: Role,
}

/// Access-level tag carried in tokens.
///
/// Roles are an open set: any non-empty tag from the seed data is accepted,
/// normalized to uppercase. The constants name the tags the endpoint
/// allow-lists refer to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Role(Cow<'static, str>);

impl Role {
    pub const ADMIN: Role = Role(Cow::Borrowed("ADMIN"));
    pub const WRITER: Role = Role(Cow::Borrowed("WRITER"));
    pub const VISITOR: Role = Role(Cow::Borrowed("VISITOR"));
    /// Role of the seed `user` account; treated as visitor-equivalent.
    pub const USER: Role = Role(Cow::Borrowed("USER"));

    pub fn new(tag: &str) -> Self {
        Role(Cow::Owned(tag.trim().to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Role {
    fn from(tag: String) -> Self {
        Role::new(&tag)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.0.into_owned()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Roles allowed to list and fetch projects
pub const READ_ROLES: &[Role] = &[Role::ADMIN, Role::WRITER, Role::VISITOR, Role::USER];

/// Roles allowed to create and update projects
pub const WRITE_ROLES: &[Role] = &[Role::ADMIN, Role::WRITER];

/// Roles allowed to delete projects
pub const DELETE_ROLES: &[Role] = &[Role::ADMIN];

/// JWT Claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub role: Role,
    pub exp: usize, // expiration timestamp
}

/// Token request body. Fields are untyped so a missing or mistyped one maps
/// to a credential error instead of a deserialization failure.
#[derive(Debug, Default, Deserialize)]
pub struct TokenRequest {
    #[serde(default)]
    pub username: Option<Value>,
    #[serde(default)]
    pub password: Option<Value>,
}

impl TokenRequest {
    /// Both credentials as text.
    ///
    /// An absent, null, or empty field is missing. A non-empty value that is
    /// not a string can never match a stored password, so it is invalid.
    pub fn credentials(&self) -> Result<(&str, &str), AuthError> {
        match (credential(&self.username), credential(&self.password)) {
            (Credential::Text(username), Credential::Text(password)) => Ok((username, password)),
            (Credential::Missing, _) | (_, Credential::Missing) => {
                Err(AuthError::MissingCredentials)
            }
            _ => Err(AuthError::InvalidCredentials),
        }
    }
}

enum Credential<'a> {
    Missing,
    Text(&'a str),
    Opaque,
}

fn credential(value: &Option<Value>) -> Credential<'_> {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Credential::Missing,
        Some(Value::String(s)) if s.is_empty() => Credential::Missing,
        Some(Value::String(s)) => Credential::Text(s),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Credential::Missing,
        Some(Value::Array(items)) if items.is_empty() => Credential::Missing,
        Some(Value::Object(fields)) if fields.is_empty() => Credential::Missing,
        Some(_) => Credential::Opaque,
    }
}

/// Token response
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}
