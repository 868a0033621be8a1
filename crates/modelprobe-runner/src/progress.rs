//! Progress reporting hooks.
//!
//! The pool calls these from its collection loop only, so implementations
//! never see concurrent calls for the same batch.

use modelprobe_core::{ProbeResult, ProbeTask};
use tracing::{info, warn};

/// Receives advisory progress from a running batch.
pub trait ProgressSink: Send + Sync {
    /// The default probe finished. Called once, before the matrix starts.
    fn on_default(&self, _result: &ProbeResult) {}

    /// A probe finished. Called in completion order.
    fn on_result(&self, _result: &ProbeResult) {}

    /// Called after every `progress_every`-th completion.
    fn on_progress(&self, completed: usize, total: usize);

    /// The batch deadline expired with `abandoned` probes still running.
    fn on_deadline(&self, _abandoned: &[ProbeTask]) {}
}

/// Progress sink that only logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn on_result(&self, result: &ProbeResult) {
        info!(
            provider = %result.provider_name,
            model = %result.model,
            status = %result.status,
            elapsed_secs = ?result.elapsed_seconds,
            "Probe completed"
        );
    }

    fn on_progress(&self, completed: usize, total: usize) {
        info!(completed, total, "Batch progress");
    }

    fn on_deadline(&self, abandoned: &[ProbeTask]) {
        warn!(abandoned = abandoned.len(), "Batch deadline reached");
    }
}
