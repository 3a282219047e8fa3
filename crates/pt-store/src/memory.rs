//! In-memory store

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use pt_core::{Entity, Id};
use pt_models::{Project, Report, ReportQuery};

use crate::repository::{ProjectStore, ReportStore, StoreError, StoreResult};

/// Projects and reports kept in process memory
pub struct MemoryStore {
    projects: RwLock<BTreeMap<Id, Project>>,
    reports: RwLock<BTreeMap<Id, Report>>,
    next_project_id: AtomicI64,
    next_report_id: AtomicI64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            projects: RwLock::new(BTreeMap::new()),
            reports: RwLock::new(BTreeMap::new()),
            next_project_id: AtomicI64::new(1),
            next_report_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl ProjectStore for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<Project>> {
        Ok(self.projects.read().values().cloned().collect())
    }

    async fn get(&self, id: Id) -> StoreResult<Option<Project>> {
        Ok(self.projects.read().get(&id).cloned())
    }

    async fn insert(&self, mut project: Project) -> StoreResult<Project> {
        let id = self.next_project_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        project.id = Some(id);
        project.created_at = Some(now);
        project.updated_at = Some(now);

        self.projects.write().insert(id, project.clone());
        tracing::trace!(collection = Project::COLLECTION, id, "inserted");
        Ok(project)
    }

    async fn update(&self, mut project: Project) -> StoreResult<Project> {
        let id = project.id.ok_or_else(|| StoreError::Backend("cannot update an unsaved project".into()))?;

        let mut projects = self.projects.write();
        let stored = projects
            .get_mut(&id)
            .ok_or(StoreError::NotFound { entity: Project::TYPE_NAME, id })?;
        project.created_at = stored.created_at;
        project.updated_at = Some(Utc::now());
        *stored = project.clone();
        Ok(project)
    }

    async fn delete(&self, id: Id) -> StoreResult<Option<Project>> {
        Ok(self.projects.write().remove(&id))
    }
}

#[async_trait]
impl ReportStore for MemoryStore {
    async fn find(&self, query: &ReportQuery) -> StoreResult<Vec<Report>> {
        Ok(self
            .reports
            .read()
            .values()
            .filter(|report| query.matches(report))
            .cloned()
            .collect())
    }

    async fn get(&self, id: Id) -> StoreResult<Option<Report>> {
        Ok(self.reports.read().get(&id).cloned())
    }

    async fn insert(&self, mut report: Report) -> StoreResult<Report> {
        // Check and insert under one lock so two writers cannot take the same period.
        let mut reports = self.reports.write();
        if reports.values().any(|existing| existing.period() == report.period()) {
            return Err(StoreError::Conflict(format!(
                "a report for project {} already exists for {} {}",
                report.project_id, report.quarter, report.year
            )));
        }

        let id = self.next_report_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        report.id = Some(id);
        report.created_at = Some(now);
        report.updated_at = Some(now);

        reports.insert(id, report.clone());
        tracing::trace!(collection = Report::COLLECTION, id, "inserted");
        Ok(report)
    }

    async fn update(&self, mut report: Report) -> StoreResult<Report> {
        let id = report.id.ok_or_else(|| StoreError::Backend("cannot update an unsaved report".into()))?;

        let mut reports = self.reports.write();
        let stored = reports
            .get_mut(&id)
            .ok_or(StoreError::NotFound { entity: Report::TYPE_NAME, id })?;
        report.created_at = stored.created_at;
        report.updated_at = Some(Utc::now());
        *stored = report.clone();
        Ok(report)
    }

    async fn delete(&self, id: Id) -> StoreResult<Option<Report>> {
        Ok(self.reports.write().remove(&id))
    }

    async fn delete_for_project(&self, project_id: Id) -> StoreResult<usize> {
        let mut reports = self.reports.write();
        let before = reports.len();
        reports.retain(|_, report| report.project_id != project_id);
        Ok(before - reports.len())
    }
}
