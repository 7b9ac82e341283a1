//! Project Vault server
//! Issues role-bearing access tokens and serves the /projects CRUD API.

use anyhow::{Context, Result};
use clap::Parser;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use project_vault::{
    auth::AuthService, config::Args, create_router, AppState, ProjectStore,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Environment first so clap sees values from .env
    load_env();
    init_tracing();

    let args = Args::parse();

    let jwt_handler = args.jwt_handler()?;
    let user_store = args.user_store()?;
    info!(
        "Authentication initialized: {} users, {}-minute tokens",
        user_store.len(),
        jwt_handler.expiration().num_minutes()
    );

    let state = AppState::new(AuthService::new(user_store, jwt_handler), ProjectStore::new());
    let app = create_router(state);

    let listener = TcpListener::bind(args.listen)
        .await
        .with_context(|| format!("Failed to bind {}", args.listen))?;
    info!("API server listening on {}", args.listen);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "project_vault=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn load_env() {
    let _ = dotenv();
}
