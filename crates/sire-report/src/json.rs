//! JSON conversion report.

use sire_engine::BatchOutcome;

use crate::error::Result;

/// Serializes the whole batch outcome (mapping, per-row outcomes, summary)
/// as pretty-printed JSON for machine consumption.
pub fn render_json_report(batch: &BatchOutcome) -> Result<String> {
    Ok(serde_json::to_string_pretty(batch)?)
}
