//! Persisted JSON report.

use std::path::Path;

use modelprobe_core::{BatchReport, ModelTally, ProbeResult};
use serde::Serialize;
use thiserror::Error;

/// Errors writing the report file.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write report to '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Document written to disk after a batch.
#[derive(Debug, Serialize)]
pub struct ReportDocument<'a> {
    pub generated_at: String,
    pub default_probe: &'a ProbeResult,
    pub all_results: &'a [ProbeResult],
    pub successful: &'a [ProbeResult],
    pub total_tested: usize,
    pub success_rate: f64,
    pub abandoned: usize,
    pub model_success_counts: &'a [ModelTally],
}

impl<'a> ReportDocument<'a> {
    /// Build the document for `report`, stamped with the current time.
    pub fn new(report: &'a BatchReport) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            default_probe: &report.default_probe_result,
            all_results: &report.all_results,
            successful: &report.successful_results,
            total_tested: report.total_tasks,
            success_rate: report.success_rate,
            abandoned: report.abandoned_tasks(),
            model_success_counts: &report.model_tally,
        }
    }
}

/// Write `report` to `path` as pretty-printed JSON.
pub fn write_report(report: &BatchReport, path: &Path) -> Result<(), ReportError> {
    let json = serde_json::to_string_pretty(&ReportDocument::new(report))?;
    std::fs::write(path, json).map_err(|source| ReportError::Write {
        path: path.display().to_string(),
        source,
    })
}
