//! Project Vault
//!
//! Token-authenticated CRUD over an in-memory project collection.
//! The binary in main.rs only wires configuration, logging, and the listener.

pub mod api;
pub mod auth;
pub mod config;
pub mod errors;
pub mod middleware;
pub mod store;

pub use api::{create_router, AppState};
pub use store::{Document, Project, ProjectStore};
