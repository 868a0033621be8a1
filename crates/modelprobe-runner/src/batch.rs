//! One full harness run: default probe, matrix, aggregation.

use modelprobe_core::{aggregate, BatchReport, ProbeMatrix, ProbeResult};
use tracing::{error, info};

use crate::{ProgressSink, WorkerPool};

/// Probe the default path, run the matrix on `pool`, and aggregate.
///
/// The default probe runs first and on its own, so it is reported even if
/// the batch deadline cuts the matrix short.
pub async fn run_batch(
    pool: &WorkerPool,
    matrix: ProbeMatrix,
    progress: &dyn ProgressSink,
) -> BatchReport {
    let timeout = pool.config().per_task_timeout;
    let executor = pool.executor().clone();
    let default_task = matrix.default_task.clone();
    let default_result =
        match tokio::spawn(async move { executor.execute(&default_task, timeout).await }).await {
            Ok(result) => result,
            Err(join_err) => {
                error!(
                    model = %matrix.default_task.model,
                    error = %join_err,
                    "Default probe failed to complete"
                );
                ProbeResult::error(&matrix.default_task, 0.0, "probe task panicked")
            }
        };
    info!(
        model = %default_result.model,
        status = %default_result.status,
        "Default probe finished"
    );
    progress.on_default(&default_result);

    let outcome = pool.run(matrix.tasks, progress).await;
    let report = aggregate(default_result, outcome.results, outcome.submitted);

    info!(
        total = report.total_tasks,
        collected = report.all_results.len(),
        successful = report.successful_results.len(),
        abandoned = report.abandoned_tasks(),
        success_rate = report.success_rate,
        "Batch aggregated"
    );

    report
}
