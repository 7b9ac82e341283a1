//! User Storage
//! Fixed in-memory registry of users, seeded once at startup.

use crate::auth::models::{Role, User};
use anyhow::{bail, Result};
use std::collections::HashMap;
use tracing::info;

/// Read-only user registry keyed by username
pub struct UserStore {
    users: HashMap<String, User>,
}

impl UserStore {
    /// Build the registry from seed users, rejecting duplicate usernames
    pub fn from_seed(seed: Vec<User>) -> Result<Self> {
        let mut users = HashMap::with_capacity(seed.len());

        for user in seed {
            if users.contains_key(&user.username) {
                bail!("Duplicate seed user: {}", user.username);
            }
            info!("Seeded user: {} ({})", user.username, user.role);
            users.insert(user.username.clone(), user);
        }

        Ok(Self { users })
    }

    /// The two accounts every fresh process starts with
    pub fn default_seed() -> Vec<User> {
        vec![
            User {
                username: "admin".to_string(),
                password: "admin_pass".to_string(),
                role: Role::ADMIN,
            },
            User {
                username: "user".to_string(),
                password: "user_pass".to_string(),
                role: Role::USER,
            },
        ]
    }

    /// Get user by username
    pub fn get_user_by_username(&self, username: &str) -> Option<&User> {
        self.users.get(username)
    }

    /// Return the user if the password matches exactly
    pub fn verify_credentials(&self, username: &str, password: &str) -> Option<&User> {
        self.get_user_by_username(username)
            .filter(|user| user.password == password)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
