//! Report contracts

use std::collections::HashSet;

use pt_core::error::ValidationErrors;
use pt_models::{Report, StatusType};

use crate::base::{Contract, ValidationResult};

pub const LOCKED_MESSAGE: &str = "Report has been submitted and can no longer be edited";

/// Shape rules for a report about to be stored
#[derive(Debug, Default, Clone, Copy)]
pub struct ReportContract;

impl ReportContract {
    pub fn new() -> Self {
        Self
    }

    fn validate_progress(&self, report: &Report, errors: &mut ValidationErrors) {
        if !(0..=100).contains(&report.progress) {
            errors.add("progress", "must be between 0 and 100");
        }
        if report
            .milestones
            .iter()
            .any(|milestone| !(0..=100).contains(&milestone.progress))
        {
            errors.add("milestones", "progress must be between 0 and 100");
        }
    }

    /// At most one status entry per dimension
    fn validate_statuses(&self, report: &Report, errors: &mut ValidationErrors) {
        let mut seen: HashSet<StatusType> = HashSet::new();
        for entry in &report.statuses {
            if !seen.insert(entry.status_type) {
                errors.add("statuses", format!("has more than one {:?} entry", entry.status_type));
            }
        }
    }

    fn validate_year(&self, report: &Report, errors: &mut ValidationErrors) {
        if !(1900..=9999).contains(&report.year) {
            errors.add("year", "is not a valid fiscal year");
        }
    }
}

impl Contract<Report> for ReportContract {
    fn validate(&self, report: &Report) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        self.validate_year(report, &mut errors);
        self.validate_progress(report, &mut errors);
        self.validate_statuses(report, &mut errors);

        errors.into_result()
    }
}

/// Checks that an existing report may still be changed
#[derive(Debug, Default, Clone, Copy)]
pub struct EditReportContract {
    base: ReportContract,
}

impl EditReportContract {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Contract<Report> for EditReportContract {
    fn validate(&self, report: &Report) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        if !report.state.is_editable() {
            errors.add_base(LOCKED_MESSAGE);
            return Err(errors);
        }

        if let Err(base_errors) = self.base.validate(report) {
            errors.merge(base_errors);
        }

        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pt_models::{Quarter, ReportDraft, ReportState, ReportStatus};

    fn report(state: ReportState) -> Report {
        ReportDraft {
            project_id: 1,
            year: 2023,
            quarter: Quarter::Q1,
            state,
            phase: String::new(),
            progress: 10,
            estimated_end: None,
            finance: None,
            milestones: Vec::new(),
            objectives: Vec::new(),
            statuses: StatusType::ALL.iter().copied().map(ReportStatus::baseline).collect(),
            kpis: Vec::new(),
        }
        .into_report()
    }

    #[test]
    fn test_valid_report() {
        assert!(ReportContract::new().validate(&report(ReportState::Draft)).is_ok());
    }

    #[test]
    fn test_duplicate_status_dimension() {
        let mut report = report(ReportState::Draft);
        report.statuses.push(ReportStatus::baseline(StatusType::Budget));

        let errors = ReportContract::new().validate(&report).unwrap_err();
        assert!(errors.has_error("statuses"));
    }

    #[test]
    fn test_progress_out_of_range() {
        let mut report = report(ReportState::Draft);
        report.progress = 120;
        assert!(ReportContract::new().validate(&report).unwrap_err().has_error("progress"));
    }

    #[test]
    fn test_submitted_report_is_locked() {
        let errors = EditReportContract::new()
            .validate(&report(ReportState::Submitted))
            .unwrap_err();
        assert_eq!(errors.full_messages(), vec![LOCKED_MESSAGE.to_string()]);
    }

    #[test]
    fn test_review_report_is_editable() {
        let contract = EditReportContract::new();
        assert!(contract.validate(&report(ReportState::Review)).is_ok());
    }
}
