//! Health endpoint

use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: HealthStatus,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Process-level health information
pub struct HealthState {
    started: Instant,
}

impl Default for HealthState {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthState {
    pub fn new() -> Self {
        Self { started: Instant::now() }
    }

    pub fn report(&self) -> HealthReport {
        HealthReport {
            status: HealthStatus::Healthy,
            version: env!("CARGO_PKG_VERSION"),
            uptime_seconds: self.started.elapsed().as_secs(),
            timestamp: chrono::Utc::now(),
        }
    }
}

/// GET /health
pub async fn health(State(state): State<Arc<HealthState>>) -> Json<HealthReport> {
    tracing::debug!("Health check");
    Json(state.report())
}
