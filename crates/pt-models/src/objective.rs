//! Objective model (embedded in a report)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::report_status::Status;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Objective {
    pub id: Option<Uuid>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub estimated_end: Option<NaiveDate>,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub comments: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ObjectiveDto {
    #[validate(length(min = 1, message = "can't be blank"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub estimated_end: Option<NaiveDate>,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub comments: String,
}

impl From<ObjectiveDto> for Objective {
    fn from(dto: ObjectiveDto) -> Self {
        Self {
            id: None,
            name: dto.name,
            description: dto.description,
            estimated_end: dto.estimated_end,
            status: dto.status,
            comments: dto.comments,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateObjectiveDto {
    #[validate(length(min = 1, message = "can't be blank"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub estimated_end: Option<NaiveDate>,
    pub status: Option<Status>,
    pub comments: Option<String>,
}

impl UpdateObjectiveDto {
    pub fn apply_to(&self, objective: &mut Objective) {
        if let Some(ref name) = self.name {
            objective.name = name.clone();
        }
        if let Some(ref description) = self.description {
            objective.description = description.clone();
        }
        if let Some(estimated_end) = self.estimated_end {
            objective.estimated_end = Some(estimated_end);
        }
        if let Some(status) = self.status {
            objective.status = status;
        }
        if let Some(ref comments) = self.comments {
            objective.comments = comments.clone();
        }
    }
}
