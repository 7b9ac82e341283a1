//! Project Storage
//!
//! Volatile id -> document map. Ids come from a counter that only moves
//! forward, so iteration order over the map is insertion order and a deleted
//! id is never handed out again.

use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use tracing::info;

/// Free-form project document, kept in client key order
pub type Document = Map<String, Value>;

/// A stored project
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: u64,
    pub document: Document,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Negative limit or offset
    InvalidRange,
    NotFound(u64),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::InvalidRange => write!(
                f,
                "Invalid values for limit or offset. They must be non-negative."
            ),
            StoreError::NotFound(_) => write!(f, "Project not found"),
        }
    }
}

impl std::error::Error for StoreError {}

#[derive(Default)]
struct Inner {
    projects: BTreeMap<u64, Document>,
    next_id: u64,
}

/// Thread-safe project store; map and counter share one lock
#[derive(Default)]
pub struct ProjectStore {
    inner: RwLock<Inner>,
}

impl ProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page through projects in id order
    pub fn list(&self, limit: i64, offset: i64) -> Result<Vec<Project>, StoreError> {
        if limit < 0 || offset < 0 {
            return Err(StoreError::InvalidRange);
        }
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);

        let inner = self.inner.read();
        Ok(inner
            .projects
            .iter()
            .skip(offset)
            .take(limit)
            .map(|(&id, document)| Project {
                id,
                document: document.clone(),
            })
            .collect())
    }

    pub fn get(&self, id: u64) -> Result<Project, StoreError> {
        let inner = self.inner.read();
        inner
            .projects
            .get(&id)
            .map(|document| Project {
                id,
                document: document.clone(),
            })
            .ok_or(StoreError::NotFound(id))
    }

    /// Store `document` under the next id and return that id
    pub fn create(&self, document: Document) -> u64 {
        let mut inner = self.inner.write();
        let id = inner.next_id;
        inner.projects.insert(id, document);
        inner.next_id += 1;

        info!(project_id = id, "Project added");
        id
    }

    /// Shallow merge: incoming keys overwrite, all other keys are kept
    pub fn update(&self, id: u64, partial: Document) -> Result<(), StoreError> {
        let mut inner = self.inner.write();
        let document = inner
            .projects
            .get_mut(&id)
            .ok_or(StoreError::NotFound(id))?;
        document.extend(partial);

        info!(project_id = id, "Project updated");
        Ok(())
    }

    pub fn delete(&self, id: u64) -> Result<(), StoreError> {
        let mut inner = self.inner.write();
        inner
            .projects
            .remove(&id)
            .ok_or(StoreError::NotFound(id))?;

        info!(project_id = id, "Project deleted");
        Ok(())
    }
}
