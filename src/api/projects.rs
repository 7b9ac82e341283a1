//! Project CRUD handlers.
//!
//! Role checks happen in the route gates; these handlers only translate
//! between HTTP and [`ProjectStore`].

use crate::auth::Role;
use crate::errors::ApiError;
use crate::store::{Document, ProjectStore};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
    Extension,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_LIMIT: i64 = 10;
pub const DEFAULT_OFFSET: i64 = 0;

/// Pagination query. Values are parsed leniently: anything that is not an
/// integer falls back to the default.
#[derive(Debug, Default)]
pub struct ListQuery {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl ListQuery {
    /// Build from raw query pairs. A repeated key keeps its first value.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "limit" => &mut query.limit,
                "offset" => &mut query.offset,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }

    pub fn limit(&self) -> i64 {
        parse_or(self.limit.as_deref(), DEFAULT_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        parse_or(self.offset.as_deref(), DEFAULT_OFFSET)
    }
}

fn parse_or(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(parse_integer).unwrap_or(default)
}

/// Integer with an optional sign. Out-of-range values saturate.
fn parse_integer(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(value) = raw.parse() {
        return Some(value);
    }

    let (negative, digits) = match raw.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(if negative { i64::MIN } else { i64::MAX })
}

/// A path id that is not a non-negative integer names no project
fn project_id(path: Result<Path<u64>, PathRejection>) -> Result<u64, ApiError> {
    path.map(|Path(id)| id).map_err(|_| ApiError::NotFound)
}

fn document(body: Result<Json<Document>, JsonRejection>) -> Result<Document, ApiError> {
    body.map(|Json(doc)| doc)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

/// GET /projects?limit=&offset=
pub async fn list_projects(
    State(store): State<Arc<ProjectStore>>,
    params: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<Document>>, ApiError> {
    let Query(pairs) = params.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let params = ListQuery::from_pairs(pairs);
    let page = store.list(params.limit(), params.offset())?;
    Ok(Json(page.into_iter().map(|p| p.document).collect()))
}

/// GET /projects/:id
pub async fn get_project(
    State(store): State<Arc<ProjectStore>>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<Document>, ApiError> {
    let project = store.get(project_id(id)?)?;
    Ok(Json(project.document))
}

/// POST /projects
pub async fn create_project(
    State(store): State<Arc<ProjectStore>>,
    Extension(role): Extension<Role>,
    body: Result<Json<Document>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let id = store.create(document(body)?);
    debug!(project_id = id, role = %role, "Create accepted");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Project added", "id": id })),
    ))
}

/// PUT /projects/:id
pub async fn update_project(
    State(store): State<Arc<ProjectStore>>,
    Extension(role): Extension<Role>,
    id: Result<Path<u64>, PathRejection>,
    body: Result<Json<Document>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let id = project_id(id)?;
    store.update(id, document(body)?)?;
    debug!(project_id = id, role = %role, "Update accepted");
    Ok(Json(json!({ "message": "Project updated" })))
}

/// DELETE /projects/:id
pub async fn delete_project(
    State(store): State<Arc<ProjectStore>>,
    Extension(role): Extension<Role>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let id = project_id(id)?;
    store.delete(id)?;
    debug!(project_id = id, role = %role, "Delete accepted");
    Ok(Json(json!({ "message": "Project deleted" })))
}
