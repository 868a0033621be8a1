//! Runner configuration.

use std::time::Duration;

use thiserror::Error;

/// Default prompt sent to every provider.
pub const DEFAULT_PROMPT: &str = "hello, how are u?";

/// Models crossed with every provider by default.
pub const DEFAULT_MODELS: &[&str] = &[
    "gpt-3.5-turbo",
    "gpt-4",
    "gpt-4o-mini",
    "claude-3-haiku",
    "gemini-pro",
];

/// Model used by the probe that names no provider.
pub const DEFAULT_PROBE_MODEL: &str = "gpt-3.5-turbo";

/// Provider name fragments skipped on every run unless overridden.
///
/// Mostly providers that need credentials or do not serve chat.
pub const DEFAULT_EXCLUSIONS: &[&str] = &[
    "Openai",
    "OpenAI",
    "NeedsAuth",
    "Anthropic",
    "AnyProvider",
    "Azure",
    "BingCreateImages",
    "BackendApi",
    "ApiAirforce",
    "ARTA",
    "You",
    "BlackForestLabs",
    "Chatai",
    "Flux1Dev",
    "BaseProvider",
];

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("concurrency must be at least 1")]
    ZeroConcurrency,

    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),

    #[error("progress interval must be at least 1")]
    ZeroProgressInterval,
}

/// Worker pool configuration.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Maximum probes in flight at once.
    pub concurrency: usize,

    /// Time allotted to one probe, measured from dispatch.
    pub per_task_timeout: Duration,

    /// Time allotted to the whole batch, measured from the first dispatch.
    pub batch_deadline: Duration,

    /// Emit a progress signal after every this many completions.
    pub progress_every: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            concurrency: 5,
            per_task_timeout: Duration::from_secs(30),
            batch_deadline: Duration::from_secs(300),
            progress_every: 10,
        }
    }
}

impl PoolConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        if self.per_task_timeout.is_zero() {
            return Err(ConfigError::ZeroDuration("per-task timeout"));
        }
        if self.batch_deadline.is_zero() {
            return Err(ConfigError::ZeroDuration("batch deadline"));
        }
        if self.progress_every == 0 {
            return Err(ConfigError::ZeroProgressInterval);
        }
        Ok(())
    }
}

/// What to ask and of which models.
#[derive(Debug, Clone)]
pub struct ProbeSettings {
    pub prompt: String,
    pub models: Vec<String>,
    pub default_model: String,
    pub temperature: f32,
    /// Case-sensitive substrings; a provider whose name contains any is skipped.
    pub exclusions: Vec<String>,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            models: DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
            default_model: DEFAULT_PROBE_MODEL.to_string(),
            temperature: 0.2,
            exclusions: DEFAULT_EXCLUSIONS.iter().map(|x| x.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PoolConfig::default();
        assert_eq!(config.concurrency, 5);
        assert_eq!(config.per_task_timeout, Duration::from_secs(30));
        assert_eq!(config.batch_deadline, Duration::from_secs(300));
        assert!(config.validate().is_ok());

        let settings = ProbeSettings::default();
        assert_eq!(settings.models.len(), 5);
        assert_eq!(settings.default_model, "gpt-3.5-turbo");
        assert!(settings.exclusions.iter().any(|x| x == "OpenAI"));
        assert_eq!(settings.exclusions.len(), DEFAULT_EXCLUSIONS.len());
    }

    #[test]
    fn test_validate_rejects_zeroes() {
        let config = PoolConfig {
            concurrency: 0,
            ..PoolConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroConcurrency)));

        let config = PoolConfig {
            batch_deadline: Duration::ZERO,
            ..PoolConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroDuration("batch deadline"))
        ));
    }
}
