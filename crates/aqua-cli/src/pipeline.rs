//! One refresh cycle: fetch → score.

use aqua_core::ranges::{ParameterStatus, parameter_statuses};
use aqua_core::{DataTable, Reading, ScoreResult, assess};
use aqua_sheets::{RecordSource, SourceError, fetch_snapshot};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Everything a single cycle renders. Rebuilt from scratch every cycle.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub source: String,
    pub fetched_at: DateTime<Utc>,
    pub reading: Reading,
    pub result: ScoreResult,
    pub message: String,
    pub parameters: Vec<ParameterStatus>,
    pub data: DataTable,
}

impl DashboardSnapshot {
    /// Build a snapshot for a reading that did not come from a sheet.
    #[must_use]
    pub fn from_reading(source: &str, reading: Reading, data: DataTable) -> Self {
        let result = assess(&reading);
        Self {
            source: source.to_string(),
            fetched_at: Utc::now(),
            parameters: parameter_statuses(&reading),
            message: result.verdict.message().to_string(),
            reading,
            result,
            data,
        }
    }
}

/// Fetch the source once and score its latest reading.
pub async fn run_cycle<S: RecordSource + Sync>(
    source: &S,
) -> Result<DashboardSnapshot, SourceError> {
    let snapshot = fetch_snapshot(source).await?;
    let dashboard = DashboardSnapshot::from_reading(&source.describe(), snapshot.reading, snapshot.table);

    tracing::debug!(
        source = %dashboard.source,
        rows = dashboard.data.len(),
        score = dashboard.result.score,
        verdict = dashboard.result.verdict.as_str(),
        "refresh cycle scored"
    );

    Ok(dashboard)
}
