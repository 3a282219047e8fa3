//! Review and submission transitions

use chrono::{DateTime, Utc};
use pt_core::Id;
use pt_models::{Report, ReportState};

use crate::error::{LifecycleError, LifecycleResult};

/// Result of a submit request
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The report was in Review and is now Submitted
    Submitted(Report),
    /// The report is still a Draft; it is returned unchanged for further editing
    ContinueEditing(Report),
}

impl SubmitOutcome {
    pub fn report(&self) -> &Report {
        match self {
            Self::Submitted(report) | Self::ContinueEditing(report) => report,
        }
    }

    pub fn into_report(self) -> Report {
        match self {
            Self::Submitted(report) | Self::ContinueEditing(report) => report,
        }
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted(_))
    }
}

/// Submit `report` on behalf of `acting_user` at `now`.
///
/// Only a report in Review is submitted. A Draft comes back as
/// [`SubmitOutcome::ContinueEditing`] and a Submitted report is rejected.
pub fn submit(
    mut report: Report,
    acting_user: Option<Id>,
    now: DateTime<Utc>,
) -> LifecycleResult<SubmitOutcome> {
    let user = acting_user.ok_or(LifecycleError::Unauthorized { action: "submit" })?;

    match report.state {
        ReportState::Draft => Ok(SubmitOutcome::ContinueEditing(report)),
        ReportState::Review => {
            report.state = ReportState::Submitted;
            report.submitter = Some(user);
            report.submitted_at = Some(now);
            Ok(SubmitOutcome::Submitted(report))
        }
        ReportState::Submitted => Err(LifecycleError::InvalidTransition {
            action: "submit",
            state: report.state,
        }),
    }
}

/// Move a Draft report to Review.
pub fn mark_for_review(mut report: Report, acting_user: Option<Id>) -> LifecycleResult<Report> {
    if acting_user.is_none() {
        return Err(LifecycleError::Unauthorized { action: "review" });
    }

    if report.state != ReportState::Draft {
        return Err(LifecycleError::InvalidTransition {
            action: "review",
            state: report.state,
        });
    }

    report.state = ReportState::Review;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pt_models::{Quarter, ReportDraft};

    fn report(state: ReportState) -> Report {
        let mut report = ReportDraft {
            project_id: 2,
            year: 2023,
            quarter: Quarter::Q2,
            state,
            phase: String::new(),
            progress: 0,
            estimated_end: None,
            finance: None,
            milestones: Vec::new(),
            objectives: Vec::new(),
            statuses: Vec::new(),
            kpis: Vec::new(),
        }
        .into_report();
        report.id = Some(5);
        report.submitter = Some(1);
        report
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 9, 29, 16, 0, 0).unwrap()
    }

    #[test]
    fn test_submit_from_review() {
        let outcome = submit(report(ReportState::Review), Some(44), now()).unwrap();
        assert!(outcome.is_submitted());

        let submitted = outcome.into_report();
        assert_eq!(submitted.state, ReportState::Submitted);
        assert_eq!(submitted.submitter, Some(44));
        assert_eq!(submitted.submitted_at, Some(now()));
    }

    #[test]
    fn test_submit_from_draft_continues_editing() {
        let draft = report(ReportState::Draft);
        let outcome = submit(draft.clone(), Some(44), now()).unwrap();
        assert_eq!(outcome, SubmitOutcome::ContinueEditing(draft));
        assert_eq!(outcome.report().state, ReportState::Draft);
    }

    #[test]
    fn test_submit_requires_acting_user() {
        let result = submit(report(ReportState::Review), None, now());
        assert!(matches!(result, Err(LifecycleError::Unauthorized { .. })));
    }

    #[test]
    fn test_submitted_is_terminal() {
        let result = submit(report(ReportState::Submitted), Some(44), now());
        assert!(matches!(
            result,
            Err(LifecycleError::InvalidTransition {
                state: ReportState::Submitted,
                ..
            })
        ));
    }

    #[test]
    fn test_mark_for_review() {
        let reviewed = mark_for_review(report(ReportState::Draft), Some(3)).unwrap();
        assert_eq!(reviewed.state, ReportState::Review);

        assert!(mark_for_review(report(ReportState::Review), Some(3)).is_err());
        assert!(matches!(
            mark_for_review(report(ReportState::Draft), None),
            Err(LifecycleError::Unauthorized { .. })
        ));
    }
}
