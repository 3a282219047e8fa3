//! Report model
//!
//! Collection: reports
//!
//! A report records a project's health for one fiscal period. There is at
//! most one report per (project, year, quarter).

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use pt_core::traits::{Entity, Id, Identifiable, ProjectScoped, Timestamped};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::kpi::Kpi;
use crate::milestone::Milestone;
use crate::objective::Objective;
use crate::report_status::ReportStatus;

/// Fiscal reporting period
///
/// The fiscal year has five periods; the third quarter is split in two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Quarter {
    Q1,
    Q2,
    Q3a,
    Q3b,
    Q4,
}

impl Quarter {
    pub const ALL: [Quarter; 5] = [
        Quarter::Q1,
        Quarter::Q2,
        Quarter::Q3a,
        Quarter::Q3b,
        Quarter::Q4,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Q1 => "Q1",
            Self::Q2 => "Q2",
            Self::Q3a => "Q3a",
            Self::Q3b => "Q3b",
            Self::Q4 => "Q4",
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Report lifecycle state: Draft -> Review -> Submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum ReportState {
    #[default]
    Draft,
    Review,
    Submitted,
}

impl ReportState {
    /// Submitted reports are frozen
    pub fn is_editable(&self) -> bool {
        !self.is_terminal()
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Submitted)
    }
}

impl fmt::Display for ReportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Draft => "Draft",
            Self::Review => "Review",
            Self::Submitted => "Submitted",
        };
        f.write_str(name)
    }
}

/// Financial figures for the reporting period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct FinancialStatus {
    pub fy_approved: f64,
    pub fy_sitting: f64,
    pub jv_to_ocio: f64,
    pub fy_forecast: f64,
    pub budget: f64,
    pub spend_to_end_of_pre_fy: f64,
    pub remaining: f64,
    pub estimated_total_cost: f64,
    #[serde(rename = "currentFYActuals")]
    pub current_fy_actuals: f64,
    #[serde(rename = "currentFYVariance")]
    pub current_fy_variance: f64,
    pub project_variance: f64,
}

/// Report entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: Option<Id>,

    pub project_id: Id,

    /// Fiscal year
    pub year: i32,

    pub quarter: Quarter,

    #[serde(default)]
    pub state: ReportState,

    #[serde(default)]
    pub phase: String,

    /// Overall progress percentage (0-100)
    #[serde(default)]
    pub progress: i32,

    pub estimated_end: Option<NaiveDate>,

    /// User who submitted the report (the project manager until then)
    pub submitter: Option<Id>,

    pub submitted_at: Option<DateTime<Utc>>,

    pub finance: Option<FinancialStatus>,

    #[serde(default)]
    pub milestones: Vec<Milestone>,

    #[serde(default)]
    pub objectives: Vec<Objective>,

    #[serde(default)]
    pub statuses: Vec<ReportStatus>,

    #[serde(default)]
    pub kpis: Vec<Kpi>,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Identifiable for Report {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

impl Timestamped for Report {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

impl ProjectScoped for Report {
    fn project_id(&self) -> Id {
        self.project_id
    }
}

impl Entity for Report {
    const COLLECTION: &'static str = "reports";
    const TYPE_NAME: &'static str = "Report";
}

impl Report {
    /// Period key used for the one-report-per-quarter rule
    pub fn period(&self) -> (Id, i32, Quarter) {
        (self.project_id, self.year, self.quarter)
    }
}

/// Unpersisted report content
///
/// Produced by rollover and accepted by the create-report operation. Carries
/// no identity, submitter, submission time or timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReportDraft {
    pub project_id: Id,
    pub year: i32,
    pub quarter: Quarter,

    #[serde(default)]
    pub state: ReportState,

    #[serde(default)]
    pub phase: String,

    #[serde(default)]
    #[validate(range(min = 0, max = 100, message = "must be between 0 and 100"))]
    pub progress: i32,

    pub estimated_end: Option<NaiveDate>,

    pub finance: Option<FinancialStatus>,

    #[serde(default)]
    pub milestones: Vec<Milestone>,

    #[serde(default)]
    pub objectives: Vec<Objective>,

    #[serde(default)]
    pub statuses: Vec<ReportStatus>,

    #[serde(default)]
    pub kpis: Vec<Kpi>,
}

impl ReportDraft {
    pub fn period(&self) -> (Id, i32, Quarter) {
        (self.project_id, self.year, self.quarter)
    }

    /// Build an unpersisted report from the draft
    pub fn into_report(self) -> Report {
        Report {
            id: None,
            project_id: self.project_id,
            year: self.year,
            quarter: self.quarter,
            state: self.state,
            phase: self.phase,
            progress: self.progress,
            estimated_end: self.estimated_end,
            submitter: None,
            submitted_at: None,
            finance: self.finance,
            milestones: self.milestones,
            objectives: self.objectives,
            statuses: self.statuses,
            kpis: self.kpis,
            created_at: None,
            updated_at: None,
        }
    }
}

/// DTO for updating a report's own fields
#[derive(Debug, Clone, Deserialize, Default, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReportDto {
    pub phase: Option<String>,

    #[validate(range(min = 0, max = 100, message = "must be between 0 and 100"))]
    pub progress: Option<i32>,

    pub estimated_end: Option<NaiveDate>,

    pub finance: Option<FinancialStatus>,
}

impl UpdateReportDto {
    pub fn apply_to(&self, report: &mut Report) {
        if let Some(ref phase) = self.phase {
            report.phase = phase.clone();
        }
        if let Some(progress) = self.progress {
            report.progress = progress;
        }
        if let Some(estimated_end) = self.estimated_end {
            report.estimated_end = Some(estimated_end);
        }
        if let Some(ref finance) = self.finance {
            report.finance = Some(finance.clone());
        }
    }
}

/// Report filter; a project is always required
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    pub project_id: Id,
    pub year: Option<i32>,
    pub quarter: Option<Quarter>,
    pub state: Option<ReportState>,
}

impl ReportQuery {
    pub fn for_project(project_id: Id) -> Self {
        Self {
            project_id,
            ..Default::default()
        }
    }

    pub fn matches(&self, report: &Report) -> bool {
        report.project_id == self.project_id
            && self.year.map_or(true, |year| report.year == year)
            && self.quarter.map_or(true, |quarter| report.quarter == quarter)
            && self.state.map_or(true, |state| report.state == state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ReportDraft {
        ReportDraft {
            project_id: 4,
            year: 2023,
            quarter: Quarter::Q3a,
            state: ReportState::Draft,
            phase: "Build".into(),
            progress: 35,
            estimated_end: NaiveDate::from_ymd_opt(2024, 3, 31),
            finance: None,
            milestones: vec![Milestone::new("Pilot")],
            objectives: Vec::new(),
            statuses: Vec::new(),
            kpis: Vec::new(),
        }
    }

    #[test]
    fn test_quarter_serialization() {
        assert_eq!(serde_json::to_value(Quarter::Q3b).unwrap(), "Q3b");
        let quarter: Quarter = serde_json::from_str("\"Q3a\"").unwrap();
        assert_eq!(quarter, Quarter::Q3a);
        assert_eq!(Quarter::Q4.to_string(), "Q4");
    }

    #[test]
    fn test_state_order() {
        assert!(ReportState::Draft < ReportState::Review);
        assert!(ReportState::Review < ReportState::Submitted);
        assert!(ReportState::Review.is_editable());
        assert!(!ReportState::Submitted.is_editable());
    }

    #[test]
    fn test_draft_into_report() {
        let report = draft().into_report();
        assert!(report.is_new_record());
        assert_eq!(report.period(), (4, 2023, Quarter::Q3a));
        assert_eq!(report.submitter, None);
        assert_eq!(report.milestones.len(), 1);
    }

    #[test]
    fn test_query_matches() {
        let report = draft().into_report();

        assert!(ReportQuery::for_project(4).matches(&report));
        assert!(!ReportQuery::for_project(5).matches(&report));

        let query = ReportQuery {
            project_id: 4,
            year: Some(2023),
            quarter: Some(Quarter::Q2),
            state: None,
        };
        assert!(!query.matches(&report));
    }

    #[test]
    fn test_finance_field_names() {
        let finance: FinancialStatus = serde_json::from_value(serde_json::json!({
            "fyApproved": 1200.0,
            "currentFYActuals": 300.0
        }))
        .unwrap();
        assert_eq!(finance.fy_approved, 1200.0);
        assert_eq!(finance.current_fy_actuals, 300.0);
        assert_eq!(finance.remaining, 0.0);
    }

    #[test]
    fn test_update_dto_validation() {
        let dto = UpdateReportDto {
            progress: Some(101),
            ..Default::default()
        };
        assert!(dto.validate().is_err());
    }
}
