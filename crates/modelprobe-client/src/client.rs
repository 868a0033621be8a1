//! The probe client boundary.

use std::time::Duration;

use async_trait::async_trait;
use modelprobe_core::ProviderHandle;

use crate::ClientError;

/// One chat completion to attempt.
#[derive(Debug, Clone)]
pub struct ProbeRequest {
    /// Provider to call; `None` selects the client's default.
    pub provider: Option<ProviderHandle>,

    /// Model identifier.
    pub model: String,

    /// Single user message.
    pub prompt: String,

    /// Sampling temperature.
    pub temperature: f32,

    /// Time allotted to the call.
    pub timeout: Duration,
}

impl ProbeRequest {
    pub fn new(
        provider: Option<ProviderHandle>,
        model: impl Into<String>,
        prompt: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            prompt: prompt.into(),
            temperature: 0.2,
            timeout,
        }
    }

    /// Builder method to set the temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Performs one probe call.
///
/// Implementations return the raw completion text. Classifying empty or
/// failed answers is left to the caller.
#[async_trait]
pub trait ProbeClient: Send + Sync {
    async fn invoke(&self, request: &ProbeRequest) -> Result<String, ClientError>;
}
