//! Batch aggregation: ranking, per-model tallies and the final report.

use serde::{Deserialize, Serialize};

use crate::ProbeResult;

/// How many providers answered for one model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelTally {
    pub model: String,
    pub count: usize,
}

/// Everything known about a finished batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Outcome of the probe that named no provider.
    pub default_probe_result: ProbeResult,

    /// Collected results in completion order.
    pub all_results: Vec<ProbeResult>,

    /// Successes, fastest first. Ties keep completion order.
    pub successful_results: Vec<ProbeResult>,

    /// Number of tasks submitted, collected or not.
    pub total_tasks: usize,

    /// Successes as a percentage of `total_tasks`; 0 when nothing was submitted.
    pub success_rate: f64,

    /// Models by number of successful providers, most first.
    pub model_tally: Vec<ModelTally>,
}

impl BatchReport {
    /// The `n` fastest working combinations.
    pub fn fastest(&self, n: usize) -> &[ProbeResult] {
        &self.successful_results[..n.min(self.successful_results.len())]
    }

    /// Distinct provider names in latency order, with their best time.
    ///
    /// Unlike `fastest(n)`, a provider appears once even when several of its
    /// models worked, so this can reach further down the ranking than `n` rows.
    pub fn priority_providers(&self, n: usize) -> Vec<(&str, f64)> {
        let mut out: Vec<(&str, f64)> = Vec::new();
        for result in &self.successful_results {
            if out.len() == n {
                break;
            }
            if out.iter().any(|(name, _)| *name == result.provider_name) {
                continue;
            }
            out.push((result.provider_name.as_str(), result.latency()));
        }
        out
    }

    /// Recommended fallback order: the `n` models that worked most often.
    pub fn fallback_models(&self, n: usize) -> &[ModelTally] {
        &self.model_tally[..n.min(self.model_tally.len())]
    }

    /// Tasks that never produced a result (cut off by the batch deadline).
    pub fn abandoned_tasks(&self) -> usize {
        self.total_tasks.saturating_sub(self.all_results.len())
    }

    pub fn has_success(&self) -> bool {
        !self.successful_results.is_empty()
    }
}

/// Build the report for a batch of `total_tasks` submitted probes.
///
/// `results` must be in completion order; it is kept as-is in
/// `all_results`. Pure: the same input always yields the same report.
pub fn aggregate(
    default_result: ProbeResult,
    results: Vec<ProbeResult>,
    total_tasks: usize,
) -> BatchReport {
    let mut successful: Vec<ProbeResult> =
        results.iter().filter(|r| r.is_success()).cloned().collect();
    // Vec::sort_by is stable
    successful.sort_by(|a, b| a.latency().total_cmp(&b.latency()));

    let model_tally = tally_models(&successful);

    let success_rate = if total_tasks == 0 {
        0.0
    } else {
        successful.len() as f64 / total_tasks as f64 * 100.0
    };

    BatchReport {
        default_probe_result: default_result,
        all_results: results,
        successful_results: successful,
        total_tasks,
        success_rate,
        model_tally,
    }
}

/// Count successes per model, ranked by count. Ties keep first-seen order.
fn tally_models(successful: &[ProbeResult]) -> Vec<ModelTally> {
    let mut tally: Vec<ModelTally> = Vec::new();
    for result in successful {
        match tally.iter_mut().find(|t| t.model == result.model) {
            Some(entry) => entry.count += 1,
            None => tally.push(ModelTally {
                model: result.model.clone(),
                count: 1,
            }),
        }
    }
    tally.sort_by(|a, b| b.count.cmp(&a.count));
    tally
}
