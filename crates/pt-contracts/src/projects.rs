//! Project contracts

use pt_core::error::ValidationErrors;
use pt_models::Project;

use crate::base::{Contract, ValidationResult};

/// Cross-field rules shared by project create and update
#[derive(Debug, Default, Clone, Copy)]
pub struct ProjectContract;

impl ProjectContract {
    pub fn new() -> Self {
        Self
    }

    /// End dates may not precede the start date
    fn validate_dates(&self, project: &Project, errors: &mut ValidationErrors) {
        if let Some(end) = project.end {
            if end < project.start {
                errors.add("end", "must not be before the start date");
            }
        }
        if let Some(estimated_end) = project.estimated_end {
            if estimated_end < project.start {
                errors.add("estimated_end", "must not be before the start date");
            }
        }
    }

    fn validate_contacts(&self, project: &Project, errors: &mut ValidationErrors) {
        for (field, user) in [
            ("sponsor", project.sponsor),
            ("manager", project.manager),
            ("financial_contact", project.financial_contact),
        ] {
            if user <= 0 {
                errors.add(field, "must reference a user");
            }
        }
    }

    fn validate_name(&self, project: &Project, errors: &mut ValidationErrors) {
        if project.name.trim().is_empty() {
            errors.add("name", "can't be blank");
        }
    }
}

impl Contract<Project> for ProjectContract {
    fn validate(&self, project: &Project) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        self.validate_name(project, &mut errors);
        self.validate_contacts(project, &mut errors);
        self.validate_dates(project, &mut errors);

        errors.into_result()
    }
}
