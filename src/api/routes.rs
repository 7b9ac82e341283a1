use axum::{
    http::StatusCode,
    middleware,
    response::{Json, Response},
    routing::{delete, get, post, put},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer};

use crate::{
    api::projects,
    auth::{
        api as auth_api, auth_middleware, AuthService, Role, RoleGate, DELETE_ROLES, READ_ROLES,
        WRITE_ROLES,
    },
    errors::message_response,
    middleware::{handle_panic, json_method_not_allowed, request_logging},
    store::ProjectStore,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub projects: Arc<ProjectStore>,
}

impl AppState {
    pub fn new(auth: AuthService, projects: ProjectStore) -> Self {
        Self {
            auth: Arc::new(auth),
            projects: Arc::new(projects),
        }
    }
}

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    let token_routes = Router::new()
        .route("/token", post(auth_api::issue_token))
        .with_state(state.auth.clone());

    let read_routes = Router::new()
        .route("/projects", get(projects::list_projects))
        .route("/projects/:id", get(projects::get_project));

    let write_routes = Router::new()
        .route("/projects", post(projects::create_project))
        .route("/projects/:id", put(projects::update_project));

    let delete_routes =
        Router::new().route("/projects/:id", delete(projects::delete_project));

    let project_routes = gated(read_routes, &state.auth, READ_ROLES)
        .merge(gated(write_routes, &state.auth, WRITE_ROLES))
        .merge(gated(delete_routes, &state.auth, DELETE_ROLES))
        .with_state(state.projects.clone());

    let public_routes = Router::new().route("/health", get(health_check));

    // CORS outermost so error and panic responses carry the headers too
    Router::new()
        .merge(public_routes)
        .merge(token_routes)
        .merge(project_routes)
        .fallback(not_found)
        .layer(middleware::from_fn(json_method_not_allowed))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn(request_logging))
        .layer(CorsLayer::permissive())
}

/// Put every route in `router` behind a role gate
fn gated(
    router: Router<Arc<ProjectStore>>,
    auth: &Arc<AuthService>,
    allowed: &'static [Role],
) -> Router<Arc<ProjectStore>> {
    router.route_layer(middleware::from_fn_with_state(
        RoleGate::new(auth.clone(), allowed),
        auth_middleware,
    ))
}

// ===== Route Handlers =====

/// Health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn not_found() -> Response {
    message_response(StatusCode::NOT_FOUND, "Not Found")
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}
