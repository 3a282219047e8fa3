//! Axum extractors and shared state for API handlers

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use pt_core::config::AuthConfig;
use pt_core::Id;
use pt_services::{ProjectService, ReportService};
use pt_store::{MemoryStore, ProjectStore, ReportStore};

use crate::error::ApiError;

/// Header carrying the acting user's id
pub const USER_HEADER: &str = "x-user-id";

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub projects: Arc<ProjectService>,
    pub reports: Arc<ReportService>,
    pub auth: Arc<AuthConfig>,
}

impl AppState {
    pub fn new(
        project_store: Arc<dyn ProjectStore>,
        report_store: Arc<dyn ReportStore>,
        auth: AuthConfig,
    ) -> Self {
        Self {
            projects: Arc::new(ProjectService::new(project_store.clone(), report_store.clone())),
            reports: Arc::new(ReportService::new(project_store, report_store)),
            auth: Arc::new(auth),
        }
    }

    /// State backed by a fresh in-memory store
    pub fn in_memory(auth: AuthConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::new(store.clone(), store, auth)
    }
}

/// The user performing the request, from the `X-User-Id` header.
///
/// Requests without the header are rejected when authentication is
/// required; otherwise they proceed with no acting user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActingUser(pub Option<Id>);

#[async_trait]
impl<S> FromRequestParts<S> for ActingUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        match parts.headers.get(USER_HEADER) {
            Some(value) => {
                let id = value
                    .to_str()
                    .ok()
                    .and_then(|raw| raw.trim().parse::<Id>().ok())
                    .filter(|id| *id > 0)
                    .ok_or_else(|| ApiError::unauthorized("X-User-Id must be a positive user id"))?;
                Ok(ActingUser(Some(id)))
            }
            None if app_state.auth.require_authentication => {
                Err(ApiError::unauthorized("Authentication required"))
            }
            None => Ok(ActingUser(None)),
        }
    }
}

impl std::ops::Deref for ActingUser {
    type Target = Option<Id>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
