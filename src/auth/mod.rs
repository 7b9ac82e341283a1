//! Authentication Module
//! Stateless JWT access tokens with role-based route gates

pub mod api;
pub mod errors;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod service;
pub mod user_store;

pub use errors::AuthError;
pub use jwt::JwtHandler;
pub use middleware::{auth_middleware, RoleGate};
pub use models::{Role, DELETE_ROLES, READ_ROLES, WRITE_ROLES};
pub use service::AuthService;
pub use user_store::UserStore;
