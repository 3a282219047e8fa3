//! Project API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use pt_core::Id;
use pt_models::{CreateProjectDto, UpdateProjectDto};

use crate::error::ApiResult;
use crate::extractors::{ActingUser, AppState};

/// GET /api/v1/projects
pub async fn list_projects(State(state): State<AppState>, _user: ActingUser) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.projects.list_projects().await?))
}

/// GET /api/v1/projects/:id
pub async fn get_project(
    State(state): State<AppState>,
    _user: ActingUser,
    Path(id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.projects.get_project(id).await?))
}

/// POST /api/v1/projects
///
/// Also creates the project's initial report.
pub async fn create_project(
    State(state): State<AppState>,
    _user: ActingUser,
    Json(dto): Json<CreateProjectDto>,
) -> ApiResult<impl IntoResponse> {
    let project = state.projects.create_project(dto).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// PATCH /api/v1/projects/:id
pub async fn update_project(
    State(state): State<AppState>,
    _user: ActingUser,
    Path(id): Path<Id>,
    Json(dto): Json<UpdateProjectDto>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.projects.update_project(id, dto).await?))
}

/// DELETE /api/v1/projects/:id
pub async fn delete_project(
    State(state): State<AppState>,
    _user: ActingUser,
    Path(id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    state.projects.delete_project(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
