//! ModelProbe Core Domain Types
//!
//! This crate contains pure domain types with no dependencies on:
//! - Network/HTTP
//! - Async runtime
//! - Console or file output
//!
//! It builds the probe matrix, classifies single outcomes and aggregates
//! finished batches. Execution lives in `modelprobe-runner`.

pub mod aggregate;
pub mod error;
pub mod ids;
pub mod matrix;
pub mod provider;
pub mod status;
pub mod task;

// Re-export commonly used types
pub use aggregate::{aggregate, BatchReport, ModelTally};
pub use error::CoreError;
pub use ids::ProbeId;
pub use matrix::{build_matrix, ProbeMatrix};
pub use provider::{ProviderEntry, ProviderHandle, ProviderRegistry};
pub use status::ProbeStatus;
pub use task::{
    truncate_error, truncate_preview, ProbeResult, ProbeTask, DEFAULT_PROVIDER_NAME,
};
