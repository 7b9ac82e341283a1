//! Configuration
//!
//! CLI arguments with environment fallbacks, parsed with clap.

use crate::auth::{jwt::DEFAULT_TOKEN_TTL_MINUTES, models::User, JwtHandler, Role, UserStore};
use anyhow::{bail, Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use tracing::warn;

pub const DEFAULT_JWT_SECRET: &str = "dev-secret-change-in-production";
pub const DEFAULT_SEED_USERS: &str = "admin:admin_pass:ADMIN,user:user_pass:USER";

#[derive(Parser, Debug, Clone)]
#[command(name = "project-vault")]
#[command(about = "Token-authenticated project CRUD service")]
pub struct Args {
    /// Address to listen on
    #[arg(long, env = "LISTEN", default_value = "127.0.0.1:5000")]
    pub listen: SocketAddr,

    /// HMAC-SHA256 secret used to sign access tokens
    #[arg(long, env = "JWT_SECRET", default_value = DEFAULT_JWT_SECRET, hide_env_values = true)]
    pub jwt_secret: String,

    /// Access token lifetime in minutes
    #[arg(long, env = "TOKEN_TTL_MINUTES", default_value_t = DEFAULT_TOKEN_TTL_MINUTES)]
    pub token_ttl_minutes: i64,

    /// Seed users as comma-separated username:password:ROLE triples.
    /// The password may contain ':' but not ','
    #[arg(long, env = "SEED_USERS", default_value = DEFAULT_SEED_USERS, hide_env_values = true)]
    pub seed_users: String,
}

impl Args {
    pub fn jwt_handler(&self) -> Result<JwtHandler> {
        if self.jwt_secret.is_empty() {
            bail!("JWT secret must not be empty");
        }
        if self.token_ttl_minutes <= 0 {
            bail!(
                "Token lifetime must be positive, got {} minutes",
                self.token_ttl_minutes
            );
        }
        if self.jwt_secret == DEFAULT_JWT_SECRET {
            warn!("Using the default JWT secret. Set JWT_SECRET in production!");
        }

        Ok(JwtHandler::with_ttl_minutes(
            self.jwt_secret.clone(),
            self.token_ttl_minutes,
        ))
    }

    pub fn user_store(&self) -> Result<UserStore> {
        let seed = parse_seed_users(&self.seed_users)?;
        let users = UserStore::from_seed(seed).context("Invalid seed users")?;
        if users.is_empty() {
            bail!("At least one seed user is required");
        }
        Ok(users)
    }
}

/// Parse `username:password:ROLE` triples separated by commas. The username
/// ends at the first ':' and the role starts after the last one.
pub fn parse_seed_users(raw: &str) -> Result<Vec<User>> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let parsed = entry.split_once(':').and_then(|(username, rest)| {
                let (password, role) = rest.rsplit_once(':')?;
                Some((username.trim(), password.trim(), role.trim()))
            });
            match parsed {
                Some((username, password, role))
                    if !username.is_empty() && !password.is_empty() && !role.is_empty() =>
                {
                    Ok(User {
                        username: username.to_string(),
                        password: password.to_string(),
                        role: Role::new(role),
                    })
                }
                _ => bail!("Malformed seed user entry: {:?}", entry),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let args = Args::try_parse_from(["project-vault"]).unwrap();

        assert_eq!(args.listen, "127.0.0.1:5000".parse::<SocketAddr>().unwrap());
        assert_eq!(args.token_ttl_minutes, 30);

        let users = args.user_store().unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(
            users.get_user_by_username("admin").unwrap().role,
            Role::ADMIN
        );
    }

    #[test]
    fn test_parse_seed_users() {
        let users = parse_seed_users("a:pa:admin, w:pw:WRITER ,").unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].role, Role::ADMIN);
        assert_eq!(users[1].username, "w");
        assert_eq!(users[1].password, "pw");
    }

    #[test]
    fn test_malformed_seed_rejected() {
        assert!(parse_seed_users("admin:admin_pass").is_err());
        assert!(parse_seed_users("admin::ADMIN").is_err());
        assert!(parse_seed_users(":pass:ADMIN").is_err());
    }

    #[test]
    fn test_password_may_contain_colons() {
        let users = parse_seed_users("ops:s3:cr:et:WRITER").unwrap();

        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username, "ops");
        assert_eq!(users[0].password, "s3:cr:et");
        assert_eq!(users[0].role, Role::WRITER);
    }

    #[test]
    fn test_empty_seed_rejected() {
        let args = Args::try_parse_from(["project-vault", "--seed-users", " , "]).unwrap();
        assert!(args.user_store().is_err());
    }

    #[test]
    fn test_invalid_jwt_settings_rejected() {
        let empty_secret =
            Args::try_parse_from(["project-vault", "--jwt-secret", ""]).unwrap();
        assert!(empty_secret.jwt_handler().is_err());

        let zero_ttl =
            Args::try_parse_from(["project-vault", "--token-ttl-minutes", "0"]).unwrap();
        assert!(zero_ttl.jwt_handler().is_err());
    }

    #[test]
    fn test_duplicate_seed_users_rejected() {
        let args = Args::try_parse_from([
            "project-vault",
            "--seed-users",
            "admin:a:ADMIN,admin:b:WRITER",
        ])
        .unwrap();
        assert!(args.user_store().is_err());
    }
}
