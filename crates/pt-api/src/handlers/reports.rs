//! Report API handlers

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use pt_core::Id;
use pt_lifecycle::SubmitOutcome;
use pt_models::{Report, ReportDraft, ReportQuery, UpdateReportDto};
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::extractors::{ActingUser, AppState};

/// GET /api/v1/reports?projectId=&year=&quarter=&state=
pub async fn list_reports(
    State(state): State<AppState>,
    _user: ActingUser,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let Query(query) = query.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    Ok(Json(state.reports.find_reports(&query).await?))
}

/// POST /api/v1/reports
pub async fn create_report(
    State(state): State<AppState>,
    _user: ActingUser,
    Json(draft): Json<ReportDraft>,
) -> ApiResult<impl IntoResponse> {
    let report = state.reports.create_report(draft).await?;
    Ok((StatusCode::CREATED, Json(report)))
}

/// GET /api/v1/reports/:id
pub async fn get_report(
    State(state): State<AppState>,
    _user: ActingUser,
    Path(id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.reports.find_report(id).await?))
}

/// PATCH /api/v1/reports/:id
pub async fn update_report(
    State(state): State<AppState>,
    _user: ActingUser,
    Path(id): Path<Id>,
    Json(dto): Json<UpdateReportDto>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.reports.update_report(id, dto).await?))
}

/// DELETE /api/v1/reports/:id
pub async fn delete_report(
    State(state): State<AppState>,
    _user: ActingUser,
    Path(id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    state.reports.delete_report(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/reports/:id/review
pub async fn review_report(
    State(state): State<AppState>,
    user: ActingUser,
    Path(id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.reports.mark_for_review(id, *user).await?))
}

/// POST /api/v1/reports/:id/submit
///
/// A Draft report answers with `continueEditing` and is left unchanged.
pub async fn submit_report(
    State(state): State<AppState>,
    user: ActingUser,
    Path(id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    let outcome = state.reports.submit_report(id, *user, Utc::now()).await?;
    Ok(Json(SubmitResponse::from(outcome)))
}

/// POST /api/v1/reports/:id/rollover
pub async fn roll_over_report(
    State(state): State<AppState>,
    _user: ActingUser,
    Path(id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    let report = state.reports.roll_over(id).await?;
    Ok((StatusCode::CREATED, Json(report)))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SubmitResult {
    Submitted,
    ContinueEditing,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub outcome: SubmitResult,
    pub report: Report,
}

impl From<SubmitOutcome> for SubmitResponse {
    fn from(outcome: SubmitOutcome) -> Self {
        match outcome {
            SubmitOutcome::Submitted(report) => Self { outcome: SubmitResult::Submitted, report },
            SubmitOutcome::ContinueEditing(report) => Self { outcome: SubmitResult::ContinueEditing, report },
        }
    }
}
