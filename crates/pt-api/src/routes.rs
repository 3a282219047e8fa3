//! API routes

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::extractors::AppState;
use crate::handlers::{items, projects, reports};

/// Create the complete API router
pub fn router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_router())
}

fn api_v1_router() -> Router<AppState> {
    Router::new()
        .nest("/projects", projects_router())
        .nest("/reports", reports_router())
}

fn projects_router() -> Router<AppState> {
    Router::new()
        .route("/", get(projects::list_projects).post(projects::create_project))
        .route(
            "/:id",
            get(projects::get_project)
                .patch(projects::update_project)
                .delete(projects::delete_project),
        )
}

fn reports_router() -> Router<AppState> {
    Router::new()
        .route("/", get(reports::list_reports).post(reports::create_report))
        .route(
            "/:id",
            get(reports::get_report)
                .patch(reports::update_report)
                .delete(reports::delete_report),
        )
        .route("/:id/review", post(reports::review_report))
        .route("/:id/submit", post(reports::submit_report))
        .route("/:id/rollover", post(reports::roll_over_report))
        .route("/:id/milestones", get(items::list_milestones).post(items::add_milestone))
        .route(
            "/:id/milestones/:item_id",
            patch(items::update_milestone).delete(items::delete_milestone),
        )
        .route("/:id/objectives", get(items::list_objectives).post(items::add_objective))
        .route(
            "/:id/objectives/:item_id",
            patch(items::update_objective).delete(items::delete_objective),
        )
        .route("/:id/statuses", get(items::list_statuses).post(items::add_status))
        .route(
            "/:id/statuses/:item_id",
            patch(items::update_status).delete(items::delete_status),
        )
}
