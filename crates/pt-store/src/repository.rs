//! Store traits and errors

use async_trait::async_trait;
use pt_core::{Id, TrackerError};
use pt_models::{Project, Report, ReportQuery};

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Id },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for TrackerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => TrackerError::not_found(entity, "id", id),
            StoreError::Conflict(message) => TrackerError::conflict(message),
            StoreError::Backend(message) => TrackerError::Storage(message),
        }
    }
}

/// Project persistence
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// All projects ordered by id
    async fn list(&self) -> StoreResult<Vec<Project>>;

    async fn get(&self, id: Id) -> StoreResult<Option<Project>>;

    /// Assign an id and timestamps, then store the project
    async fn insert(&self, project: Project) -> StoreResult<Project>;

    /// Replace a stored project
    async fn update(&self, project: Project) -> StoreResult<Project>;

    /// Remove a project, returning it if it existed
    async fn delete(&self, id: Id) -> StoreResult<Option<Project>>;
}

/// Report persistence
///
/// Implementations enforce one report per (project, year, quarter).
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Reports matching the query, ordered by id
    async fn find(&self, query: &ReportQuery) -> StoreResult<Vec<Report>>;

    async fn get(&self, id: Id) -> StoreResult<Option<Report>>;

    /// Assign an id and timestamps, then store the report.
    ///
    /// Fails with [`StoreError::Conflict`] when the period is already taken.
    async fn insert(&self, report: Report) -> StoreResult<Report>;

    /// Replace a stored report
    async fn update(&self, report: Report) -> StoreResult<Report>;

    async fn delete(&self, id: Id) -> StoreResult<Option<Report>>;

    /// Remove every report of a project, returning how many were removed
    async fn delete_for_project(&self, project_id: Id) -> StoreResult<usize>;
}
