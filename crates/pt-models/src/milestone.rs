//! Milestone model (embedded in a report)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Milestone health
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MilestoneStatus {
    Green,
    Yellow,
    Red,
    Completed,
    #[default]
    NotStarted,
}

impl MilestoneStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Milestone tracked by a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    /// Unique within the owning report; assigned when the item is stored
    pub id: Option<Uuid>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: MilestoneStatus,
    pub start: Option<NaiveDate>,
    pub estimated_end: Option<NaiveDate>,
    #[serde(default)]
    pub progress: i32,
    #[serde(default)]
    pub comments: String,
}

impl Milestone {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: String::new(),
            status: MilestoneStatus::default(),
            start: None,
            estimated_end: None,
            progress: 0,
            comments: String::new(),
        }
    }
}

/// DTO for adding a milestone
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneDto {
    #[validate(length(min = 1, message = "can't be blank"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: MilestoneStatus,
    pub start: Option<NaiveDate>,
    pub estimated_end: Option<NaiveDate>,
    #[serde(default)]
    #[validate(range(min = 0, max = 100, message = "must be between 0 and 100"))]
    pub progress: i32,
    #[serde(default)]
    pub comments: String,
}

impl From<MilestoneDto> for Milestone {
    fn from(dto: MilestoneDto) -> Self {
        Self {
            id: None,
            name: dto.name,
            description: dto.description,
            status: dto.status,
            start: dto.start,
            estimated_end: dto.estimated_end,
            progress: dto.progress,
            comments: dto.comments,
        }
    }
}

/// DTO for partially updating a milestone
#[derive(Debug, Clone, Deserialize, Default, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMilestoneDto {
    #[validate(length(min = 1, message = "can't be blank"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<MilestoneStatus>,
    pub start: Option<NaiveDate>,
    pub estimated_end: Option<NaiveDate>,
    #[validate(range(min = 0, max = 100, message = "must be between 0 and 100"))]
    pub progress: Option<i32>,
    pub comments: Option<String>,
}

impl UpdateMilestoneDto {
    pub fn apply_to(&self, milestone: &mut Milestone) {
        if let Some(ref name) = self.name {
            milestone.name = name.clone();
        }
        if let Some(ref description) = self.description {
            milestone.description = description.clone();
        }
        if let Some(status) = self.status {
            milestone.status = status;
        }
        if let Some(start) = self.start {
            milestone.start = Some(start);
        }
        if let Some(estimated_end) = self.estimated_end {
            milestone.estimated_end = Some(estimated_end);
        }
        if let Some(progress) = self.progress {
            milestone.progress = progress;
        }
        if let Some(ref comments) = self.comments {
            milestone.comments = comments.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_status_is_not_started() {
        let milestone: Milestone = serde_json::from_str(r#"{"name":"Launch"}"#).unwrap();
        assert_eq!(milestone.status, MilestoneStatus::NotStarted);
        assert!(!milestone.status.is_completed());
    }

    #[test]
    fn test_update_keeps_identity() {
        let mut milestone = Milestone::new("Launch");
        milestone.id = Some(Uuid::new_v4());
        let id = milestone.id;

        UpdateMilestoneDto {
            status: Some(MilestoneStatus::Completed),
            progress: Some(100),
            ..Default::default()
        }
        .apply_to(&mut milestone);

        assert_eq!(milestone.id, id);
        assert!(milestone.status.is_completed());
        assert_eq!(milestone.progress, 100);
    }
}
