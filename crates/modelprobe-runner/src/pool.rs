//! Bounded worker pool.
//!
//! Every task is spawned onto a `JoinSet` up front and waits for a
//! semaphore permit before calling the executor, so at most `concurrency`
//! probes are in flight. The per-task timeout starts once the permit is
//! held. The collection loop owns the result list and the completion
//! counter; workers share nothing but the semaphore.

use std::collections::HashMap;
use std::sync::Arc;

use modelprobe_core::{ProbeResult, ProbeTask};
use tokio::sync::Semaphore;
use tokio::task::{Id, JoinSet};
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use crate::{ConfigError, PoolConfig, ProbeExecutor, ProgressSink};

/// What a batch produced.
#[derive(Debug, Clone, Default)]
pub struct PoolOutcome {
    /// Results in completion order.
    pub results: Vec<ProbeResult>,

    /// Tasks still running when the batch deadline expired, in submission order.
    pub abandoned: Vec<ProbeTask>,

    /// Number of tasks submitted.
    pub submitted: usize,
}

impl PoolOutcome {
    pub fn deadline_hit(&self) -> bool {
        !self.abandoned.is_empty()
    }
}

/// Fixed-size pool running probes through a [`ProbeExecutor`].
pub struct WorkerPool {
    executor: ProbeExecutor,
    config: PoolConfig,
}

impl WorkerPool {
    /// Create a pool, rejecting unusable configuration.
    pub fn new(executor: ProbeExecutor, config: PoolConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { executor, config })
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    pub fn executor(&self) -> &ProbeExecutor {
        &self.executor
    }

    /// Run all `tasks` and collect their results as they complete.
    ///
    /// Returns once every task has settled or the batch deadline expires,
    /// whichever comes first. Tasks still running at the deadline are
    /// aborted and reported in [`PoolOutcome::abandoned`]; their results are
    /// never collected.
    pub async fn run(&self, tasks: Vec<ProbeTask>, progress: &dyn ProgressSink) -> PoolOutcome {
        let total = tasks.len();
        let deadline = Instant::now() + self.config.batch_deadline;
        let permits = Arc::new(Semaphore::new(self.config.concurrency));

        info!(
            tasks = total,
            concurrency = self.config.concurrency,
            per_task_timeout_secs = self.config.per_task_timeout.as_secs_f64(),
            batch_deadline_secs = self.config.batch_deadline.as_secs_f64(),
            "Starting batch"
        );

        let mut workers = JoinSet::new();
        // Submission index alongside each task, to report abandoned ones in matrix order.
        let mut pending: HashMap<Id, (usize, ProbeTask)> = HashMap::with_capacity(total);

        for (index, task) in tasks.into_iter().enumerate() {
            let executor = self.executor.clone();
            let permits = Arc::clone(&permits);
            let timeout = self.config.per_task_timeout;
            let probe = task.clone();

            let handle = workers.spawn(async move {
                // The semaphore is never closed while the pool is running.
                let _permit = permits.acquire_owned().await.ok();
                executor.execute(&probe, timeout).await
            });
            pending.insert(handle.id(), (index, task));
        }

        let mut results = Vec::with_capacity(total);

        loop {
            let joined = match tokio::time::timeout_at(deadline, workers.join_next_with_id()).await
            {
                Ok(Some(joined)) => joined,
                Ok(None) => break,
                Err(_) => {
                    warn!(
                        collected = results.len(),
                        outstanding = pending.len(),
                        "Batch deadline expired, abandoning outstanding probes"
                    );
                    break;
                }
            };

            let result = match joined {
                Ok((id, result)) => {
                    pending.remove(&id);
                    result
                }
                Err(join_err) => {
                    let Some((_, task)) = pending.remove(&join_err.id()) else {
                        continue;
                    };
                    error!(
                        provider = %task.display_provider(),
                        model = %task.model,
                        error = %join_err,
                        "Probe task failed to complete"
                    );
                    ProbeResult::error(&task, 0.0, "probe task panicked")
                }
            };

            progress.on_result(&result);
            results.push(result);

            let completed = results.len();
            if completed % self.config.progress_every == 0 {
                progress.on_progress(completed, total);
            }
        }

        workers.abort_all();

        let mut outstanding: Vec<(usize, ProbeTask)> = pending.into_values().collect();
        outstanding.sort_by_key(|(index, _)| *index);
        let abandoned: Vec<ProbeTask> = outstanding.into_iter().map(|(_, task)| task).collect();
        if !abandoned.is_empty() {
            progress.on_deadline(&abandoned);
        }

        debug!(
            collected = results.len(),
            abandoned = abandoned.len(),
            "Batch finished"
        );

        PoolOutcome {
            results,
            abandoned,
            submitted: total,
        }
    }
}
