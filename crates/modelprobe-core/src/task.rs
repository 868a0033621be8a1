//! Probe tasks and their classified results.

use serde::{Deserialize, Serialize};

use crate::{ProbeId, ProbeStatus, ProviderHandle};

/// Provider name reported for the probe that names no provider.
pub const DEFAULT_PROVIDER_NAME: &str = "DEFAULT";

/// Maximum characters kept in a success preview.
pub const PREVIEW_CHARS: usize = 100;

/// Marker appended to a preview that was cut.
pub const ELLIPSIS: &str = "...";

/// Maximum characters kept from a failure description.
pub const ERROR_CHARS: usize = 200;

/// One (provider, model) probe. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeTask {
    /// Unique probe identifier.
    pub id: ProbeId,

    /// Provider name; `None` means "let the client pick".
    pub provider_name: Option<String>,

    /// Handle passed to the client; `None` exactly when `provider_name` is.
    pub provider_handle: Option<ProviderHandle>,

    /// Model identifier.
    pub model: String,
}

impl ProbeTask {
    /// Create a task against a named provider.
    pub fn new(
        provider_name: impl Into<String>,
        provider_handle: ProviderHandle,
        model: impl Into<String>,
    ) -> Self {
        Self {
            id: ProbeId::generate(),
            provider_name: Some(provider_name.into()),
            provider_handle: Some(provider_handle),
            model: model.into(),
        }
    }

    /// Create the task that omits the provider.
    pub fn default_provider(model: impl Into<String>) -> Self {
        Self {
            id: ProbeId::generate(),
            provider_name: None,
            provider_handle: None,
            model: model.into(),
        }
    }

    /// Name used in results and reports.
    pub fn display_provider(&self) -> &str {
        self.provider_name.as_deref().unwrap_or(DEFAULT_PROVIDER_NAME)
    }

    pub fn is_default(&self) -> bool {
        self.provider_name.is_none()
    }
}

/// Outcome of one executed probe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeResult {
    /// Probe this result belongs to.
    pub probe_id: ProbeId,

    #[serde(rename = "provider")]
    pub provider_name: String,

    pub model: String,

    pub status: ProbeStatus,

    /// Wall-clock seconds of the call, two decimals. `None` for timeouts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elapsed_seconds: Option<f64>,

    /// Trimmed response, cut to 100 characters. Success only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_preview: Option<String>,

    /// Character count of the trimmed response. Success only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_length: Option<usize>,

    /// Failure description, cut to 200 characters. Error only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ProbeResult {
    fn bare(task: &ProbeTask, status: ProbeStatus) -> Self {
        Self {
            probe_id: task.id.clone(),
            provider_name: task.display_provider().to_string(),
            model: task.model.clone(),
            status,
            elapsed_seconds: None,
            response_preview: None,
            response_length: None,
            error_message: None,
        }
    }

    /// Classify text returned by the client.
    ///
    /// Whitespace-only text is `EmptyResponse`; anything else is `Success`
    /// with the trimmed length and preview.
    pub fn from_response(task: &ProbeTask, elapsed_secs: f64, text: &str) -> Self {
        let trimmed = text.trim();
        let length = trimmed.chars().count();

        if length == 0 {
            return Self {
                elapsed_seconds: Some(round_secs(elapsed_secs)),
                ..Self::bare(task, ProbeStatus::EmptyResponse)
            };
        }

        Self {
            elapsed_seconds: Some(round_secs(elapsed_secs)),
            response_preview: Some(truncate_preview(trimmed)),
            response_length: Some(length),
            ..Self::bare(task, ProbeStatus::Success)
        }
    }

    /// A client-reported failure. Elapsed is kept for diagnostics only.
    pub fn error(task: &ProbeTask, elapsed_secs: f64, message: &str) -> Self {
        Self {
            elapsed_seconds: Some(round_secs(elapsed_secs)),
            error_message: Some(truncate_error(message)),
            ..Self::bare(task, ProbeStatus::Error)
        }
    }

    /// The per-task timeout fired first.
    pub fn timeout(task: &ProbeTask) -> Self {
        Self::bare(task, ProbeStatus::Timeout)
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Latency used for ranking; non-success results sort last.
    pub fn latency(&self) -> f64 {
        self.elapsed_seconds.unwrap_or(f64::INFINITY)
    }
}

/// First 100 characters of `text`, with `...` appended only when cut.
pub fn truncate_preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((idx, _)) => format!("{}{}", &text[..idx], ELLIPSIS),
        None => text.to_string(),
    }
}

/// First 200 characters of `message`.
pub fn truncate_error(message: &str) -> String {
    match message.char_indices().nth(ERROR_CHARS) {
        Some((idx, _)) => message[..idx].to_string(),
        None => message.to_string(),
    }
}

fn round_secs(secs: f64) -> f64 {
    (secs * 100.0).round() / 100.0
}
