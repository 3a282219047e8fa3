//! Report status dimensions
//!
//! Every report carries one status entry per [`StatusType`] (overall, scope,
//! budget, schedule, other), each with a traffic-light status and a trend.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Traffic-light health
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Status {
    #[default]
    Green,
    Yellow,
    Red,
}

/// Direction of travel since the previous report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Trend {
    Up,
    #[default]
    Steady,
    Down,
}

/// Reporting dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusType {
    Overall,
    Scope,
    Budget,
    Schedule,
    Other,
}

impl StatusType {
    /// All dimensions in declaration order
    pub const ALL: [StatusType; 5] = [
        StatusType::Overall,
        StatusType::Scope,
        StatusType::Budget,
        StatusType::Schedule,
        StatusType::Other,
    ];
}

/// One dimension's status entry on a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStatus {
    pub id: Option<Uuid>,
    #[serde(rename = "type")]
    pub status_type: StatusType,
    pub status: Status,
    pub trend: Trend,
    #[serde(default)]
    pub comments: String,
}

impl ReportStatus {
    /// Green/Steady entry with no comments
    pub fn baseline(status_type: StatusType) -> Self {
        Self {
            id: None,
            status_type,
            status: Status::Green,
            trend: Trend::Steady,
            comments: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReportStatusDto {
    #[serde(rename = "type")]
    pub status_type: StatusType,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub trend: Trend,
    #[serde(default)]
    #[validate(length(max = 4000, message = "is too long (maximum is 4000 characters)"))]
    pub comments: String,
}

impl From<ReportStatusDto> for ReportStatus {
    fn from(dto: ReportStatusDto) -> Self {
        Self {
            id: None,
            status_type: dto.status_type,
            status: dto.status,
            trend: dto.trend,
            comments: dto.comments,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReportStatusDto {
    pub status: Option<Status>,
    pub trend: Option<Trend>,
    #[validate(length(max = 4000, message = "is too long (maximum is 4000 characters)"))]
    pub comments: Option<String>,
}

impl UpdateReportStatusDto {
    pub fn apply_to(&self, entry: &mut ReportStatus) {
        if let Some(status) = self.status {
            entry.status = status;
        }
        if let Some(trend) = self.trend {
            entry.trend = trend;
        }
        if let Some(ref comments) = self.comments {
            entry.comments = comments.clone();
        }
    }
}
