//! Report service
//!
//! Report CRUD, sub-collection editing and the lifecycle operations
//! (review, submit, rollover).

pub mod items;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use pt_contracts::reports::{EditReportContract, ReportContract};
use pt_contracts::Contract;
use pt_core::{Entity, Id, TrackerError, TrackerResult};
use pt_lifecycle::{advance_quarter, LifecycleError, SubmitOutcome};
use pt_models::{
    Milestone, MilestoneDto, Objective, ObjectiveDto, Project, Report, ReportDraft, ReportQuery,
    ReportState, ReportStatus, ReportStatusDto, UpdateMilestoneDto, UpdateObjectiveDto,
    UpdateReportDto, UpdateReportStatusDto,
};
use pt_store::{ProjectStore, ReportStore};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::validation::validate_dto;
use items::{assign_item_ids, fresh_item_id, position, ReportItem};

pub struct ReportService {
    projects: Arc<dyn ProjectStore>,
    reports: Arc<dyn ReportStore>,
}

impl ReportService {
    pub fn new(projects: Arc<dyn ProjectStore>, reports: Arc<dyn ReportStore>) -> Self {
        Self { projects, reports }
    }

    pub async fn find_reports(&self, query: &ReportQuery) -> TrackerResult<Vec<Report>> {
        let reports = self.reports.find(query).await?;
        debug!(project_id = query.project_id, count = reports.len(), "Found reports");
        Ok(reports)
    }

    pub async fn find_report(&self, id: Id) -> TrackerResult<Report> {
        debug!(report_id = id, "Loading report");
        self.reports
            .get(id)
            .await?
            .ok_or_else(|| TrackerError::not_found(Report::TYPE_NAME, "id", id))
    }

    /// Store a new report. The project must exist and its period must be free.
    #[instrument(skip(self, draft), fields(project_id = draft.project_id, quarter = %draft.quarter, year = draft.year))]
    pub async fn create_report(&self, draft: ReportDraft) -> TrackerResult<Report> {
        validate_dto(&draft)?;

        if self.projects.get(draft.project_id).await?.is_none() {
            return Err(TrackerError::not_found(Project::TYPE_NAME, "id", draft.project_id));
        }

        if draft.state != ReportState::Draft {
            debug!(requested = %draft.state, "New reports always start in Draft");
        }
        let mut report = draft.into_report();
        report.state = ReportState::Draft;
        assign_item_ids(&mut report);
        ReportContract::new().validate(&report)?;

        let report = self.reports.insert(report).await.map_err(|err| {
            warn!(error = %err, "Report rejected by store");
            TrackerError::from(err)
        })?;

        info!(report_id = ?report.id, "Report created");
        Ok(report)
    }

    #[instrument(skip(self, dto))]
    pub async fn update_report(&self, id: Id, dto: UpdateReportDto) -> TrackerResult<Report> {
        validate_dto(&dto)?;

        let mut report = self.editable_report(id).await?;
        dto.apply_to(&mut report);

        let report = self.save(report).await?;
        info!(report_id = id, "Report updated");
        Ok(report)
    }

    #[instrument(skip(self))]
    pub async fn delete_report(&self, id: Id) -> TrackerResult<Report> {
        let report = self
            .reports
            .delete(id)
            .await?
            .ok_or_else(|| TrackerError::not_found(Report::TYPE_NAME, "id", id))?;

        info!(report_id = id, project_id = report.project_id, "Report deleted");
        Ok(report)
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Draft -> Review
    #[instrument(skip(self))]
    pub async fn mark_for_review(&self, id: Id, acting_user: Option<Id>) -> TrackerResult<Report> {
        let report = self.find_report(id).await?;
        let state = report.state;

        let report = pt_lifecycle::mark_for_review(report, acting_user)
            .map_err(|err| rejected(id, state, err))?;

        let report = self.reports.update(report).await?;
        info!(report_id = id, user = ?acting_user, "Report marked for review");
        Ok(report)
    }

    /// Review -> Submitted, stamping the acting user and `now`.
    ///
    /// A Draft report is returned unchanged as
    /// [`SubmitOutcome::ContinueEditing`].
    #[instrument(skip(self, now))]
    pub async fn submit_report(
        &self,
        id: Id,
        acting_user: Option<Id>,
        now: DateTime<Utc>,
    ) -> TrackerResult<SubmitOutcome> {
        let report = self.find_report(id).await?;
        let state = report.state;

        match pt_lifecycle::submit(report, acting_user, now).map_err(|err| rejected(id, state, err))? {
            SubmitOutcome::Submitted(report) => {
                let report = self.reports.update(report).await?;
                info!(report_id = id, submitter = ?report.submitter, "Report submitted");
                Ok(SubmitOutcome::Submitted(report))
            }
            outcome @ SubmitOutcome::ContinueEditing(_) => {
                debug!(report_id = id, "Report still in draft, continue editing");
                Ok(outcome)
            }
        }
    }

    /// Create the next period's report from report `id`
    #[instrument(skip(self))]
    pub async fn roll_over(&self, id: Id) -> TrackerResult<Report> {
        let previous = self.find_report(id).await?;
        let draft = advance_quarter(&previous)?;

        let report = self.create_report(draft).await?;
        info!(
            report_id = id,
            next_report_id = ?report.id,
            quarter = %report.quarter,
            year = report.year,
            "Report rolled over"
        );
        Ok(report)
    }

    // ------------------------------------------------------------------
    // Sub-collections
    // ------------------------------------------------------------------

    pub async fn list_items<T: ReportItem>(&self, report_id: Id) -> TrackerResult<Vec<T>> {
        let report = self.find_report(report_id).await?;
        Ok(T::items(&report).to_vec())
    }

    /// Append `item` under a fresh id
    pub async fn add_item<T: ReportItem>(&self, report_id: Id, mut item: T) -> TrackerResult<T> {
        let mut report = self.editable_report(report_id).await?;

        let item_id = fresh_item_id::<T>(&report);
        item.set_item_id(item_id);
        T::items_mut(&mut report).push(item.clone());

        self.save(report).await?;
        info!(report_id, item = T::NAME, %item_id, "Report item added");
        Ok(item)
    }

    pub async fn update_item<T, F>(&self, report_id: Id, item_id: Uuid, apply: F) -> TrackerResult<T>
    where
        T: ReportItem,
        F: FnOnce(&mut T) + Send,
    {
        let mut report = self.editable_report(report_id).await?;
        let index = position::<T>(&report, item_id).ok_or_else(|| item_not_found::<T>(item_id))?;

        let item = {
            let item = &mut T::items_mut(&mut report)[index];
            apply(item);
            item.clone()
        };

        self.save(report).await?;
        info!(report_id, item = T::NAME, %item_id, "Report item updated");
        Ok(item)
    }

    pub async fn delete_item<T: ReportItem>(&self, report_id: Id, item_id: Uuid) -> TrackerResult<T> {
        let mut report = self.editable_report(report_id).await?;
        let index = position::<T>(&report, item_id).ok_or_else(|| item_not_found::<T>(item_id))?;

        let item = T::items_mut(&mut report).remove(index);

        self.save(report).await?;
        info!(report_id, item = T::NAME, %item_id, "Report item deleted");
        Ok(item)
    }

    pub async fn list_milestones(&self, report_id: Id) -> TrackerResult<Vec<Milestone>> {
        self.list_items(report_id).await
    }

    pub async fn add_milestone(&self, report_id: Id, dto: MilestoneDto) -> TrackerResult<Milestone> {
        validate_dto(&dto)?;
        self.add_item(report_id, Milestone::from(dto)).await
    }

    pub async fn update_milestone(
        &self,
        report_id: Id,
        milestone_id: Uuid,
        dto: UpdateMilestoneDto,
    ) -> TrackerResult<Milestone> {
        validate_dto(&dto)?;
        self.update_item(report_id, milestone_id, |milestone: &mut Milestone| dto.apply_to(milestone))
            .await
    }

    pub async fn delete_milestone(&self, report_id: Id, milestone_id: Uuid) -> TrackerResult<Milestone> {
        self.delete_item(report_id, milestone_id).await
    }

    pub async fn list_objectives(&self, report_id: Id) -> TrackerResult<Vec<Objective>> {
        self.list_items(report_id).await
    }

    pub async fn add_objective(&self, report_id: Id, dto: ObjectiveDto) -> TrackerResult<Objective> {
        validate_dto(&dto)?;
        self.add_item(report_id, Objective::from(dto)).await
    }

    pub async fn update_objective(
        &self,
        report_id: Id,
        objective_id: Uuid,
        dto: UpdateObjectiveDto,
    ) -> TrackerResult<Objective> {
        validate_dto(&dto)?;
        self.update_item(report_id, objective_id, |objective: &mut Objective| dto.apply_to(objective))
            .await
    }

    pub async fn delete_objective(&self, report_id: Id, objective_id: Uuid) -> TrackerResult<Objective> {
        self.delete_item(report_id, objective_id).await
    }

    pub async fn list_statuses(&self, report_id: Id) -> TrackerResult<Vec<ReportStatus>> {
        self.list_items(report_id).await
    }

    /// Add a status entry; a report holds at most one entry per dimension
    pub async fn add_status(&self, report_id: Id, dto: ReportStatusDto) -> TrackerResult<ReportStatus> {
        validate_dto(&dto)?;
        self.add_item(report_id, ReportStatus::from(dto)).await
    }

    pub async fn update_status(
        &self,
        report_id: Id,
        status_id: Uuid,
        dto: UpdateReportStatusDto,
    ) -> TrackerResult<ReportStatus> {
        validate_dto(&dto)?;
        self.update_item(report_id, status_id, |entry: &mut ReportStatus| dto.apply_to(entry))
            .await
    }

    pub async fn delete_status(&self, report_id: Id, status_id: Uuid) -> TrackerResult<ReportStatus> {
        self.delete_item(report_id, status_id).await
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    /// Load a report that may still be changed
    async fn editable_report(&self, id: Id) -> TrackerResult<Report> {
        let report = self.find_report(id).await?;
        if let Err(errors) = EditReportContract::new().validate(&report) {
            warn!(report_id = id, state = %report.state, "Edit rejected");
            return Err(errors.into());
        }
        Ok(report)
    }

    async fn save(&self, report: Report) -> TrackerResult<Report> {
        ReportContract::new().validate(&report)?;
        Ok(self.reports.update(report).await?)
    }
}

fn rejected(report_id: Id, state: ReportState, err: LifecycleError) -> TrackerError {
    warn!(report_id, state = %state, error = %err, "Lifecycle transition rejected");
    err.into()
}

fn item_not_found<T: ReportItem>(id: Uuid) -> TrackerError {
    TrackerError::not_found(T::NAME, "id", id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use pt_models::{MilestoneStatus, Quarter, Status, StatusType};
    use pt_store::MemoryStore;

    struct Fixture {
        service: ReportService,
        store: Arc<MemoryStore>,
        project_id: Id,
    }

    async fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let mut project = Project::new("Digital Permits", 2, NaiveDate::from_ymd_opt(2022, 5, 15).unwrap());
        project.sponsor = 1;
        project.financial_contact = 3;
        let project = ProjectStore::insert(store.as_ref(), project).await.unwrap();

        Fixture {
            service: ReportService::new(store.clone(), store.clone()),
            store,
            project_id: project.id.unwrap(),
        }
    }

    fn draft(project_id: Id, year: i32, quarter: Quarter) -> ReportDraft {
        ReportDraft {
            project_id,
            year,
            quarter,
            state: ReportState::Draft,
            phase: "Build".into(),
            progress: 20,
            estimated_end: None,
            finance: None,
            milestones: vec![Milestone::new("Pilot")],
            objectives: Vec::new(),
            statuses: StatusType::ALL.iter().copied().map(ReportStatus::baseline).collect(),
            kpis: Vec::new(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 6, 30, 17, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_create_report_requires_project() {
        let f = fixture().await;
        let err = f.service.create_report(draft(99, 2023, Quarter::Q1)).await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_create_report_starts_in_draft() {
        let f = fixture().await;
        let draft: ReportDraft = serde_json::from_value(serde_json::json!({
            "projectId": f.project_id,
            "year": 2023,
            "quarter": "Q1",
            "state": "Submitted",
            "statuses": []
        }))
        .unwrap();

        let report = f.service.create_report(draft).await.unwrap();
        assert_eq!(report.state, ReportState::Draft);
        assert!(report.submitter.is_none());
        assert!(report.submitted_at.is_none());

        let stored = f.service.find_report(report.id.unwrap()).await.unwrap();
        assert_eq!(stored.state, ReportState::Draft);
    }

    #[tokio::test]
    async fn test_duplicate_report_is_conflict() {
        let f = fixture().await;
        f.service.create_report(draft(f.project_id, 2023, Quarter::Q1)).await.unwrap();

        let err = f
            .service
            .create_report(draft(f.project_id, 2023, Quarter::Q1))
            .await
            .unwrap_err();
        assert!(matches!(err, TrackerError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_find_reports_by_quarter() {
        let f = fixture().await;
        f.service.create_report(draft(f.project_id, 2023, Quarter::Q1)).await.unwrap();
        f.service.create_report(draft(f.project_id, 2023, Quarter::Q2)).await.unwrap();

        let query = ReportQuery {
            quarter: Some(Quarter::Q2),
            ..ReportQuery::for_project(f.project_id)
        };
        let reports = f.service.find_reports(&query).await.unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].quarter, Quarter::Q2);
    }

    #[tokio::test]
    async fn test_review_then_submit() {
        let f = fixture().await;
        let report = f.service.create_report(draft(f.project_id, 2023, Quarter::Q1)).await.unwrap();
        let id = report.id.unwrap();

        let outcome = f.service.submit_report(id, Some(8), now()).await.unwrap();
        assert!(!outcome.is_submitted());
        assert_eq!(f.service.find_report(id).await.unwrap().state, ReportState::Draft);

        f.service.mark_for_review(id, Some(8)).await.unwrap();
        let outcome = f.service.submit_report(id, Some(8), now()).await.unwrap();
        assert!(outcome.is_submitted());

        let stored = f.service.find_report(id).await.unwrap();
        assert_eq!(stored.state, ReportState::Submitted);
        assert_eq!(stored.submitter, Some(8));
        assert_eq!(stored.submitted_at, Some(now()));
    }

    #[tokio::test]
    async fn test_submit_without_user_leaves_report_unchanged() {
        let f = fixture().await;
        let report = f.service.create_report(draft(f.project_id, 2023, Quarter::Q1)).await.unwrap();
        let id = report.id.unwrap();
        f.service.mark_for_review(id, Some(8)).await.unwrap();

        let err = f.service.submit_report(id, None, now()).await.unwrap_err();
        assert_eq!(err.status_code(), 401);
        assert_eq!(f.service.find_report(id).await.unwrap().state, ReportState::Review);
    }

    #[tokio::test]
    async fn test_submitted_report_is_locked() {
        let f = fixture().await;
        let report = f.service.create_report(draft(f.project_id, 2023, Quarter::Q1)).await.unwrap();
        let id = report.id.unwrap();
        f.service.mark_for_review(id, Some(8)).await.unwrap();
        f.service.submit_report(id, Some(8), now()).await.unwrap();

        let err = f
            .service
            .update_report(id, UpdateReportDto { progress: Some(90), ..Default::default() })
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 422);

        let dto: MilestoneDto = serde_json::from_value(serde_json::json!({ "name": "Late" })).unwrap();
        assert!(f.service.add_milestone(id, dto).await.is_err());

        let err = f.service.submit_report(id, Some(8), now()).await.unwrap_err();
        assert!(matches!(err, TrackerError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn test_roll_over_creates_next_period() {
        let f = fixture().await;
        let report = f.service.create_report(draft(f.project_id, 2023, Quarter::Q4)).await.unwrap();
        let id = report.id.unwrap();
        f.service.mark_for_review(id, Some(8)).await.unwrap();
        f.service.submit_report(id, Some(8), now()).await.unwrap();

        let next = f.service.roll_over(id).await.unwrap();
        assert_eq!((next.year, next.quarter), (2024, Quarter::Q1));
        assert_eq!(next.state, ReportState::Draft);
        assert_ne!(next.id, report.id);
        assert!(next.submitter.is_none());
        assert!(next.submitted_at.is_none());
        assert_eq!(next.milestones[0].name, "Pilot");
        assert_ne!(next.milestones[0].id, report.milestones[0].id);
    }

    #[tokio::test]
    async fn test_roll_over_twice_is_conflict() {
        let f = fixture().await;
        let report = f.service.create_report(draft(f.project_id, 2023, Quarter::Q1)).await.unwrap();
        let id = report.id.unwrap();

        f.service.roll_over(id).await.unwrap();
        let err = f.service.roll_over(id).await.unwrap_err();
        assert_eq!(err.status_code(), 409);
    }

    #[tokio::test]
    async fn test_milestone_crud() {
        let f = fixture().await;
        let report = f.service.create_report(draft(f.project_id, 2023, Quarter::Q1)).await.unwrap();
        let id = report.id.unwrap();

        let dto: MilestoneDto =
            serde_json::from_value(serde_json::json!({ "name": "Go live", "progress": 10 })).unwrap();
        let added = f.service.add_milestone(id, dto).await.unwrap();
        let milestone_id = added.id.unwrap();
        assert_eq!(f.service.list_milestones(id).await.unwrap().len(), 2);

        let updated = f
            .service
            .update_milestone(
                id,
                milestone_id,
                UpdateMilestoneDto {
                    status: Some(MilestoneStatus::Completed),
                    progress: Some(100),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.id, Some(milestone_id));
        assert!(updated.status.is_completed());

        let deleted = f.service.delete_milestone(id, milestone_id).await.unwrap();
        assert_eq!(deleted.name, "Go live");

        let err = f.service.delete_milestone(id, milestone_id).await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_objective_and_status_items() {
        let f = fixture().await;
        let report = f.service.create_report(draft(f.project_id, 2023, Quarter::Q1)).await.unwrap();
        let id = report.id.unwrap();

        let dto: ObjectiveDto =
            serde_json::from_value(serde_json::json!({ "name": "Reduce wait times" })).unwrap();
        let objective = f.service.add_objective(id, dto).await.unwrap();
        assert!(objective.id.is_some());
        assert_eq!(f.service.list_objectives(id).await.unwrap().len(), 1);

        let budget = f
            .service
            .list_statuses(id)
            .await
            .unwrap()
            .into_iter()
            .find(|entry| entry.status_type == StatusType::Budget)
            .unwrap();
        let budget_id = budget.id.unwrap();

        let updated = f
            .service
            .update_status(
                id,
                budget_id,
                UpdateReportStatusDto {
                    status: Some(Status::Yellow),
                    comments: Some("Forecast over budget".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.status, Status::Yellow);

        let err = f
            .service
            .update_status(id, Uuid::new_v4(), UpdateReportStatusDto::default())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);

        let duplicate: ReportStatusDto =
            serde_json::from_value(serde_json::json!({ "type": "Budget", "status": "Red" })).unwrap();
        let err = f.service.add_status(id, duplicate).await.unwrap_err();
        assert_eq!(err.status_code(), 422);

        let removed = f.service.delete_objective(id, objective.id.unwrap()).await.unwrap();
        assert_eq!(removed.status, Status::Green);
    }

    #[tokio::test]
    async fn test_delete_report() {
        let f = fixture().await;
        let report = f.service.create_report(draft(f.project_id, 2023, Quarter::Q1)).await.unwrap();
        let id = report.id.unwrap();

        f.service.delete_report(id).await.unwrap();
        assert!(ReportStore::get(f.store.as_ref(), id).await.unwrap().is_none());
        assert_eq!(f.service.delete_report(id).await.unwrap_err().status_code(), 404);
    }
}
