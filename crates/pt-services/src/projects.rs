//! Project service

use std::sync::Arc;

use pt_contracts::projects::ProjectContract;
use pt_contracts::reports::ReportContract;
use pt_contracts::Contract;
use pt_core::{Entity, Id, TrackerError, TrackerResult};
use pt_lifecycle::synthesize_initial_report;
use pt_models::{CreateProjectDto, Project, UpdateProjectDto};
use pt_store::{ProjectStore, ReportStore};
use tracing::{debug, info, instrument, warn};

use crate::reports::items::assign_item_ids;
use crate::validation::{validate_dto, validate_each};

/// Project CRUD; creating a project also creates its first report
pub struct ProjectService {
    projects: Arc<dyn ProjectStore>,
    reports: Arc<dyn ReportStore>,
}

impl ProjectService {
    pub fn new(projects: Arc<dyn ProjectStore>, reports: Arc<dyn ReportStore>) -> Self {
        Self { projects, reports }
    }

    pub async fn list_projects(&self) -> TrackerResult<Vec<Project>> {
        let projects = self.projects.list().await?;
        debug!(count = projects.len(), "Listed projects");
        Ok(projects)
    }

    pub async fn get_project(&self, id: Id) -> TrackerResult<Project> {
        debug!(project_id = id, "Loading project");
        self.projects
            .get(id)
            .await?
            .ok_or_else(|| TrackerError::not_found(Project::TYPE_NAME, "id", id))
    }

    /// Persist a project and synthesise its initial Draft report from the
    /// milestones, objectives and KPIs carried by the request.
    #[instrument(skip(self, dto), fields(name = %dto.name))]
    pub async fn create_project(&self, dto: CreateProjectDto) -> TrackerResult<Project> {
        let mut errors = validate_dto(&dto).err().unwrap_or_default();
        if let Err(nested) = validate_each("milestones", &dto.milestones) {
            errors.merge(nested);
        }
        if let Err(nested) = validate_each("objectives", &dto.objectives) {
            errors.merge(nested);
        }
        errors.into_result()?;

        let (project, milestones, objectives, kpis) = dto.into_parts();
        ProjectContract::new().validate(&project)?;

        let project = self.projects.insert(project).await?;
        let project_id = project.id.unwrap_or_default();

        let mut report = synthesize_initial_report(&project, milestones, objectives, kpis);
        assign_item_ids(&mut report);
        let stored = match ReportContract::new().validate(&report) {
            Ok(()) => self.reports.insert(report).await.map_err(TrackerError::from),
            Err(errors) => Err(errors.into()),
        };

        match stored {
            Ok(report) => {
                info!(
                    project_id,
                    report_id = ?report.id,
                    quarter = %report.quarter,
                    year = report.year,
                    "Project created"
                );
                Ok(project)
            }
            Err(err) => {
                warn!(project_id, error = %err, "Initial report failed, removing project");
                self.projects.delete(project_id).await?;
                Err(err)
            }
        }
    }

    #[instrument(skip(self, dto))]
    pub async fn update_project(&self, id: Id, dto: UpdateProjectDto) -> TrackerResult<Project> {
        validate_dto(&dto)?;

        let mut project = self.get_project(id).await?;
        dto.apply_to(&mut project);
        ProjectContract::new().validate(&project)?;

        let project = self.projects.update(project).await?;
        info!(project_id = id, "Project updated");
        Ok(project)
    }

    /// Delete a project after removing all of its reports
    #[instrument(skip(self))]
    pub async fn delete_project(&self, id: Id) -> TrackerResult<Project> {
        let project = self.get_project(id).await?;

        let removed = self.reports.delete_for_project(id).await?;
        self.projects.delete(id).await?;

        info!(project_id = id, reports = removed, "Project deleted");
        Ok(project)
    }
}
