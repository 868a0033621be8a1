//! Core domain errors.

use thiserror::Error;

/// Core domain errors for ModelProbe.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No models were given to cross with the providers.
    #[error("No models to probe")]
    NoModels,

    /// A provider name appears twice in the registry.
    #[error("Duplicate provider: {0}")]
    DuplicateProvider(String),

    /// Invalid input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
