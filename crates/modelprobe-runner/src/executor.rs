//! Single-probe execution and outcome classification.

use std::sync::Arc;
use std::time::Duration;

use modelprobe_client::{ClientError, ProbeClient, ProbeRequest};
use modelprobe_core::{ProbeResult, ProbeTask};
use tokio::time::Instant;
use tracing::debug;

/// Executes probes against a [`ProbeClient`].
///
/// The executor is the only layer that enforces the per-task timeout. A
/// client that gives up on its own with [`ClientError::Timeout`] is
/// classified the same way.
#[derive(Clone)]
pub struct ProbeExecutor {
    client: Arc<dyn ProbeClient>,
    prompt: Arc<str>,
    temperature: f32,
}

impl ProbeExecutor {
    /// Create an executor that sends `prompt` on every probe.
    pub fn new(client: Arc<dyn ProbeClient>, prompt: impl Into<String>) -> Self {
        Self {
            client,
            prompt: Arc::from(prompt.into()),
            temperature: 0.2,
        }
    }

    /// Builder method to set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Run one probe and classify the outcome. Never fails.
    pub async fn execute(&self, task: &ProbeTask, timeout: Duration) -> ProbeResult {
        let request = ProbeRequest::new(
            task.provider_handle.clone(),
            task.model.clone(),
            &*self.prompt,
            timeout,
        )
        .with_temperature(self.temperature);

        let start = Instant::now();
        let outcome = tokio::time::timeout(timeout, self.client.invoke(&request)).await;
        let elapsed = start.elapsed().as_secs_f64();

        let result = match outcome {
            Err(_) | Ok(Err(ClientError::Timeout)) => ProbeResult::timeout(task),
            Ok(Err(e)) => ProbeResult::error(task, elapsed, &e.to_string()),
            Ok(Ok(text)) => ProbeResult::from_response(task, elapsed, &text),
        };

        debug!(
            provider = %result.provider_name,
            model = %result.model,
            status = %result.status,
            elapsed_secs = elapsed,
            "Probe finished"
        );

        result
    }

    /// Probe the implicit-provider path with `model`.
    pub async fn execute_default(&self, model: &str, timeout: Duration) -> ProbeResult {
        let task = ProbeTask::default_provider(model);
        self.execute(&task, timeout).await
    }
}
