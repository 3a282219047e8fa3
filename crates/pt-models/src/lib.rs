//! # pt-models
//!
//! Domain models for Project Tracker.
//!
//! Projects own a series of quarterly reports. Each report embeds its
//! milestones, objectives, status dimensions and KPIs; those embedded items
//! carry their own UUIDs that are unique within the owning report only.

pub use pt_core::traits::{Entity, Id, Identifiable, ProjectScoped, Timestamped};

pub mod kpi;
pub mod milestone;
pub mod objective;
pub mod project;
pub mod report;
pub mod report_status;

pub use kpi::Kpi;
pub use milestone::{Milestone, MilestoneDto, MilestoneStatus, UpdateMilestoneDto};
pub use objective::{Objective, ObjectiveDto, UpdateObjectiveDto};
pub use project::{CreateProjectDto, Project, UpdateProjectDto};
pub use report::{
    FinancialStatus, Quarter, Report, ReportDraft, ReportQuery, ReportState, UpdateReportDto,
};
pub use report_status::{ReportStatus, ReportStatusDto, Status, StatusType, Trend, UpdateReportStatusDto};
