//! Key performance indicator (embedded in a report)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Kpi {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Unit the baseline, target and value are measured in
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub baseline: f64,
    #[serde(default)]
    pub target: f64,
    #[serde(default)]
    pub value: f64,
    pub end: Option<NaiveDate>,
    /// Measures an outcome of the project
    #[serde(default)]
    pub outcome: bool,
    /// Measures an output of the project
    #[serde(default)]
    pub output: bool,
}
