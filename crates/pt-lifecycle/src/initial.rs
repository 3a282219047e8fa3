//! First report for a newly created project

use pt_models::{Kpi, Milestone, Objective, Project, Report, ReportState, ReportStatus, StatusType};

use crate::quarter::initial_period;

/// Build the unpersisted first report of `project`.
///
/// The period comes from the project's start date. Every status dimension
/// starts Green/Steady and the project manager is the default submitter.
pub fn synthesize_initial_report(
    project: &Project,
    milestones: Vec<Milestone>,
    objectives: Vec<Objective>,
    kpis: Vec<Kpi>,
) -> Report {
    let (quarter, year) = initial_period(project.start);
    let statuses = StatusType::ALL.iter().copied().map(ReportStatus::baseline).collect();

    Report {
        id: None,
        project_id: project.id.unwrap_or_default(),
        year,
        quarter,
        state: ReportState::Draft,
        phase: String::new(),
        progress: 0,
        estimated_end: project.estimated_end,
        submitter: Some(project.manager),
        submitted_at: None,
        finance: None,
        milestones,
        objectives,
        statuses,
        kpis,
        created_at: None,
        updated_at: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pt_models::{Quarter, Status, Trend};

    fn project(start: NaiveDate) -> Project {
        let mut project = Project::new("Digital Permits", 12, start);
        project.id = Some(3);
        project.estimated_end = NaiveDate::from_ymd_opt(2024, 3, 31);
        project
    }

    #[test]
    fn test_project_starting_in_may() {
        let project = project(NaiveDate::from_ymd_opt(2022, 5, 15).unwrap());
        let report = synthesize_initial_report(&project, Vec::new(), Vec::new(), Vec::new());

        assert_eq!(report.year, 2022);
        assert_eq!(report.quarter, Quarter::Q2);
        assert_eq!(report.state, ReportState::Draft);
        assert_eq!(report.statuses.len(), 5);
        assert!(report
            .statuses
            .iter()
            .all(|s| s.status == Status::Green && s.trend == Trend::Steady && s.comments.is_empty()));
    }

    #[test]
    fn test_one_status_per_dimension_in_order() {
        let project = project(NaiveDate::from_ymd_opt(2023, 8, 1).unwrap());
        let report = synthesize_initial_report(&project, Vec::new(), Vec::new(), Vec::new());

        let types: Vec<StatusType> = report.statuses.iter().map(|s| s.status_type).collect();
        assert_eq!(types, StatusType::ALL.to_vec());
        assert_eq!(report.quarter, Quarter::Q3a);
    }

    #[test]
    fn test_copies_project_fields() {
        let project = project(NaiveDate::from_ymd_opt(2023, 11, 20).unwrap());
        let milestones = vec![Milestone::new("Discovery"), Milestone::new("Alpha")];
        let report = synthesize_initial_report(&project, milestones, Vec::new(), Vec::new());

        assert_eq!(report.project_id, 3);
        assert_eq!(report.submitter, Some(12));
        assert_eq!(report.estimated_end, project.estimated_end);
        assert_eq!(report.progress, 0);
        assert_eq!(report.phase, "");
        assert_eq!(report.milestones.len(), 2);
        assert!(report.id.is_none());
        assert!(report.submitted_at.is_none());
    }

    #[test]
    fn test_is_deterministic() {
        let project = project(NaiveDate::from_ymd_opt(2022, 1, 3).unwrap());
        let first = synthesize_initial_report(&project, Vec::new(), Vec::new(), Vec::new());
        let second = synthesize_initial_report(&project, Vec::new(), Vec::new(), Vec::new());
        assert_eq!(first, second);
        assert_eq!(first.quarter, Quarter::Q1);
    }
}
