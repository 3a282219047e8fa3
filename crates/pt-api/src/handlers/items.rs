//! Handlers for milestones, objectives and status entries of a report

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use pt_core::Id;
use pt_models::{
    MilestoneDto, ObjectiveDto, ReportStatusDto, UpdateMilestoneDto, UpdateObjectiveDto,
    UpdateReportStatusDto,
};
use uuid::Uuid;

use crate::error::ApiResult;
use crate::extractors::{ActingUser, AppState};

/// GET /api/v1/reports/:id/milestones
pub async fn list_milestones(
    State(state): State<AppState>,
    _user: ActingUser,
    Path(report_id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.reports.list_milestones(report_id).await?))
}

/// POST /api/v1/reports/:id/milestones
pub async fn add_milestone(
    State(state): State<AppState>,
    _user: ActingUser,
    Path(report_id): Path<Id>,
    Json(dto): Json<MilestoneDto>,
) -> ApiResult<impl IntoResponse> {
    let milestone = state.reports.add_milestone(report_id, dto).await?;
    Ok((StatusCode::CREATED, Json(milestone)))
}

/// PATCH /api/v1/reports/:id/milestones/:milestone_id
pub async fn update_milestone(
    State(state): State<AppState>,
    _user: ActingUser,
    Path((report_id, milestone_id)): Path<(Id, Uuid)>,
    Json(dto): Json<UpdateMilestoneDto>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.reports.update_milestone(report_id, milestone_id, dto).await?))
}

/// DELETE /api/v1/reports/:id/milestones/:milestone_id
pub async fn delete_milestone(
    State(state): State<AppState>,
    _user: ActingUser,
    Path((report_id, milestone_id)): Path<(Id, Uuid)>,
) -> ApiResult<impl IntoResponse> {
    state.reports.delete_milestone(report_id, milestone_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/reports/:id/objectives
pub async fn list_objectives(
    State(state): State<AppState>,
    _user: ActingUser,
    Path(report_id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.reports.list_objectives(report_id).await?))
}

/// POST /api/v1/reports/:id/objectives
pub async fn add_objective(
    State(state): State<AppState>,
    _user: ActingUser,
    Path(report_id): Path<Id>,
    Json(dto): Json<ObjectiveDto>,
) -> ApiResult<impl IntoResponse> {
    let objective = state.reports.add_objective(report_id, dto).await?;
    Ok((StatusCode::CREATED, Json(objective)))
}

/// PATCH /api/v1/reports/:id/objectives/:objective_id
pub async fn update_objective(
    State(state): State<AppState>,
    _user: ActingUser,
    Path((report_id, objective_id)): Path<(Id, Uuid)>,
    Json(dto): Json<UpdateObjectiveDto>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.reports.update_objective(report_id, objective_id, dto).await?))
}

/// DELETE /api/v1/reports/:id/objectives/:objective_id
pub async fn delete_objective(
    State(state): State<AppState>,
    _user: ActingUser,
    Path((report_id, objective_id)): Path<(Id, Uuid)>,
) -> ApiResult<impl IntoResponse> {
    state.reports.delete_objective(report_id, objective_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/reports/:id/statuses
pub async fn list_statuses(
    State(state): State<AppState>,
    _user: ActingUser,
    Path(report_id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.reports.list_statuses(report_id).await?))
}

/// POST /api/v1/reports/:id/statuses
pub async fn add_status(
    State(state): State<AppState>,
    _user: ActingUser,
    Path(report_id): Path<Id>,
    Json(dto): Json<ReportStatusDto>,
) -> ApiResult<impl IntoResponse> {
    let entry = state.reports.add_status(report_id, dto).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// PATCH /api/v1/reports/:id/statuses/:status_id
pub async fn update_status(
    State(state): State<AppState>,
    _user: ActingUser,
    Path((report_id, status_id)): Path<(Id, Uuid)>,
    Json(dto): Json<UpdateReportStatusDto>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.reports.update_status(report_id, status_id, dto).await?))
}

/// DELETE /api/v1/reports/:id/statuses/:status_id
pub async fn delete_status(
    State(state): State<AppState>,
    _user: ActingUser,
    Path((report_id, status_id)): Path<(Id, Uuid)>,
) -> ApiResult<impl IntoResponse> {
    state.reports.delete_status(report_id, status_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
