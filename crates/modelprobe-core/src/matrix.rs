//! Task matrix: every provider crossed with every model, plus the default probe.

use crate::{CoreError, ProbeTask, ProviderEntry};

/// Tasks for one batch.
#[derive(Debug, Clone)]
pub struct ProbeMatrix {
    /// Provider-major cross product, submitted to the pool in this order.
    pub tasks: Vec<ProbeTask>,

    /// The single probe that names no provider.
    pub default_task: ProbeTask,
}

impl ProbeMatrix {
    /// Number of provider tasks (the default probe is not counted).
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Build the matrix for `providers` × `models`.
///
/// Providers form the outer loop and models the inner loop. The default
/// probe is bound to `default_model`.
pub fn build_matrix<S: AsRef<str>>(
    providers: &[ProviderEntry],
    models: &[S],
    default_model: &str,
) -> Result<ProbeMatrix, CoreError> {
    if models.is_empty() {
        return Err(CoreError::NoModels);
    }
    if let Some(blank) = models.iter().find(|m| m.as_ref().trim().is_empty()) {
        return Err(CoreError::InvalidInput(format!(
            "blank model identifier {:?}",
            blank.as_ref()
        )));
    }
    if default_model.trim().is_empty() {
        return Err(CoreError::InvalidInput("blank default model".to_string()));
    }

    let tasks = providers
        .iter()
        .flat_map(|provider| {
            models.iter().map(move |model| {
                ProbeTask::new(provider.name.clone(), provider.handle.clone(), model.as_ref())
            })
        })
        .collect();

    Ok(ProbeMatrix {
        tasks,
        default_task: ProbeTask::default_provider(default_model),
    })
}
