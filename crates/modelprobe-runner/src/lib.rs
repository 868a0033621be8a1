//! ModelProbe batch runner.
//!
//! Runs a probe matrix against a [`ProbeClient`](modelprobe_client::ProbeClient)
//! on a fixed-size worker pool:
//!
//! - [`ProbeExecutor`] performs and classifies one probe
//! - [`WorkerPool`] bounds concurrency and applies the batch deadline
//! - [`run_batch`] ties the default probe, the pool and aggregation together

mod batch;
pub mod config;
pub mod executor;
pub mod pool;
pub mod progress;

#[cfg(test)]
mod testing;

pub use batch::run_batch;
pub use config::{ConfigError, PoolConfig, ProbeSettings};
pub use executor::ProbeExecutor;
pub use pool::{PoolOutcome, WorkerPool};
pub use progress::{LogProgress, ProgressSink};
