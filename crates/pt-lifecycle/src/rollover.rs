//! Rollover: derive the next period's draft from a report

use pt_models::{Report, ReportDraft, ReportState};
use serde_json::{Map, Value};

use crate::error::LifecycleResult;
use crate::quarter::next_period;

/// Keys removed from the report tree and every nested item before it is
/// copied forward.
const PERSISTENCE_FIELDS: [&str; 5] = ["id", "submitter", "submittedAt", "createdAt", "updatedAt"];

/// Remove `keys` from every object in `value`, at any depth.
pub fn strip_fields(value: Value, keys: &[&str]) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(key, _)| !keys.contains(&key.as_str()))
                .map(|(key, child)| (key, strip_fields(child, keys)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => {
            Value::Array(items.into_iter().map(|item| strip_fields(item, keys)).collect())
        }
        other => other,
    }
}

/// Draft of the report for the period after `previous`.
///
/// Content (phase, progress, finance and every embedded item) is copied
/// forward without identities. The state is always Draft.
pub fn advance_quarter(previous: &Report) -> LifecycleResult<ReportDraft> {
    let tree = strip_fields(serde_json::to_value(previous)?, &PERSISTENCE_FIELDS);
    let mut draft: ReportDraft = serde_json::from_value(tree)?;

    let (quarter, year) = next_period(previous.quarter, previous.year);
    draft.quarter = quarter;
    draft.year = year;
    draft.state = ReportState::Draft;

    tracing::trace!(
        project_id = previous.project_id,
        from = %previous.quarter,
        to = %quarter,
        year,
        "advanced report period"
    );

    Ok(draft)
}
