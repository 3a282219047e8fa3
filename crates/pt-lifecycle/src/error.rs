//! Lifecycle engine errors

use pt_core::TrackerError;
use pt_models::ReportState;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LifecycleError {
    #[error("An acting user is required to {action} a report")]
    Unauthorized { action: &'static str },

    #[error("Cannot {action} a report in state {state}")]
    InvalidTransition {
        action: &'static str,
        state: ReportState,
    },

    #[error("Report conversion failed: {0}")]
    Conversion(#[from] serde_json::Error),
}

pub type LifecycleResult<T> = Result<T, LifecycleError>;

impl From<LifecycleError> for TrackerError {
    fn from(err: LifecycleError) -> Self {
        match err {
            LifecycleError::Unauthorized { .. } => TrackerError::unauthorized(err.to_string()),
            LifecycleError::InvalidTransition { action, state } => {
                TrackerError::InvalidTransition {
                    action,
                    state: state.to_string(),
                }
            }
            LifecycleError::Conversion(e) => TrackerError::Internal(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_error_mapping() {
        let err: TrackerError = LifecycleError::Unauthorized { action: "submit" }.into();
        assert_eq!(err.status_code(), 401);

        let err: TrackerError = LifecycleError::InvalidTransition {
            action: "submit",
            state: ReportState::Submitted,
        }
        .into();
        assert_eq!(err.status_code(), 409);
        assert_eq!(
            err.to_string(),
            "Invalid transition: cannot submit a report in state Submitted"
        );
    }
}
