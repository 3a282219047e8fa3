//! Project model
//!
//! Collection: projects

use chrono::{DateTime, NaiveDate, Utc};
use pt_core::traits::{Entity, Id, Identifiable, Timestamped};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::kpi::Kpi;
use crate::milestone::{Milestone, MilestoneDto};
use crate::objective::{Objective, ObjectiveDto};

/// Project entity
///
/// A project is created once with its manager, sponsor and financial
/// contact, and is reported on every fiscal quarter until completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Option<Id>,

    /// Display name
    pub name: String,

    /// Capital plan system identifier
    pub cps_identifier: String,

    pub project_number: Option<String>,

    #[serde(default)]
    pub description: String,

    pub ministry: String,
    pub program: String,

    /// Executive sponsor (user id)
    pub sponsor: Id,

    /// Project manager (user id); default submitter of the project's reports
    pub manager: Id,

    /// Financial contact (user id)
    pub financial_contact: Id,

    /// Project start date; determines the first reporting quarter
    pub start: NaiveDate,

    /// Actual end date, once the project has closed
    pub end: Option<NaiveDate>,

    pub estimated_end: Option<NaiveDate>,

    /// Overall progress percentage (0-100)
    #[serde(default)]
    pub progress: i32,

    #[serde(default)]
    pub phase: String,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            cps_identifier: String::new(),
            project_number: None,
            description: String::new(),
            ministry: String::new(),
            program: String::new(),
            sponsor: 0,
            manager: 0,
            financial_contact: 0,
            start: NaiveDate::default(),
            end: None,
            estimated_end: None,
            progress: 0,
            phase: String::new(),
            created_at: None,
            updated_at: None,
        }
    }
}

impl Identifiable for Project {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

impl Timestamped for Project {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

impl Entity for Project {
    const COLLECTION: &'static str = "projects";
    const TYPE_NAME: &'static str = "Project";
}

impl Project {
    /// Create a new project with minimal required fields
    pub fn new(name: impl Into<String>, manager: Id, start: NaiveDate) -> Self {
        Self {
            name: name.into(),
            manager,
            start,
            ..Default::default()
        }
    }
}

/// DTO for creating a new project
///
/// The initial milestones, objectives and KPIs are not stored on the
/// project itself; they seed the project's first report.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectDto {
    #[validate(length(min = 8, max = 50, message = "must be between 8 and 50 characters"))]
    pub name: String,

    #[validate(length(equal = 11, message = "must be exactly 11 characters"))]
    pub cps_identifier: String,

    pub project_number: Option<String>,

    #[serde(default)]
    pub description: String,

    #[validate(length(min = 6, message = "is too short (minimum is 6 characters)"))]
    pub ministry: String,

    #[validate(length(min = 5, message = "is too short (minimum is 5 characters)"))]
    pub program: String,

    pub sponsor: Id,
    pub manager: Id,
    pub financial_contact: Id,

    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
    pub estimated_end: Option<NaiveDate>,

    #[serde(default)]
    #[validate(range(min = 0, max = 100, message = "must be between 0 and 100"))]
    pub progress: i32,

    pub phase: Option<String>,

    #[serde(default)]
    pub milestones: Vec<MilestoneDto>,

    #[serde(default)]
    pub objectives: Vec<ObjectiveDto>,

    #[serde(default)]
    pub kpis: Vec<Kpi>,
}

impl CreateProjectDto {
    /// Split the request into the project and the items that seed its first report
    pub fn into_parts(self) -> (Project, Vec<Milestone>, Vec<Objective>, Vec<Kpi>) {
        let project = Project {
            id: None,
            name: self.name,
            cps_identifier: self.cps_identifier,
            project_number: self.project_number,
            description: self.description,
            ministry: self.ministry,
            program: self.program,
            sponsor: self.sponsor,
            manager: self.manager,
            financial_contact: self.financial_contact,
            start: self.start,
            end: self.end,
            estimated_end: self.estimated_end,
            progress: self.progress,
            phase: self.phase.unwrap_or_default(),
            created_at: None,
            updated_at: None,
        };
        let milestones = self.milestones.into_iter().map(Milestone::from).collect();
        let objectives = self.objectives.into_iter().map(Objective::from).collect();

        (project, milestones, objectives, self.kpis)
    }
}

/// DTO for updating a project
#[derive(Debug, Clone, Deserialize, Default, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectDto {
    #[validate(length(min = 8, max = 50, message = "must be between 8 and 50 characters"))]
    pub name: Option<String>,

    #[validate(length(equal = 11, message = "must be exactly 11 characters"))]
    pub cps_identifier: Option<String>,

    pub project_number: Option<String>,
    pub description: Option<String>,

    #[validate(length(min = 6, message = "is too short (minimum is 6 characters)"))]
    pub ministry: Option<String>,

    #[validate(length(min = 5, message = "is too short (minimum is 5 characters)"))]
    pub program: Option<String>,

    pub sponsor: Option<Id>,
    pub manager: Option<Id>,
    pub financial_contact: Option<Id>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub estimated_end: Option<NaiveDate>,

    #[validate(range(min = 0, max = 100, message = "must be between 0 and 100"))]
    pub progress: Option<i32>,

    pub phase: Option<String>,
}

impl UpdateProjectDto {
    /// Apply updates to a project
    pub fn apply_to(&self, project: &mut Project) {
        if let Some(ref name) = self.name {
            project.name = name.clone();
        }
        if let Some(ref cps_identifier) = self.cps_identifier {
            project.cps_identifier = cps_identifier.clone();
        }
        if let Some(ref project_number) = self.project_number {
            project.project_number = Some(project_number.clone());
        }
        if let Some(ref description) = self.description {
            project.description = description.clone();
        }
        if let Some(ref ministry) = self.ministry {
            project.ministry = ministry.clone();
        }
        if let Some(ref program) = self.program {
            project.program = program.clone();
        }
        if let Some(sponsor) = self.sponsor {
            project.sponsor = sponsor;
        }
        if let Some(manager) = self.manager {
            project.manager = manager;
        }
        if let Some(financial_contact) = self.financial_contact {
            project.financial_contact = financial_contact;
        }
        if let Some(start) = self.start {
            project.start = start;
        }
        if let Some(end) = self.end {
            project.end = Some(end);
        }
        if let Some(estimated_end) = self.estimated_end {
            project.estimated_end = Some(estimated_end);
        }
        if let Some(progress) = self.progress {
            project.progress = progress;
        }
        if let Some(ref phase) = self.phase {
            project.phase = phase.clone();
        }
    }
}
