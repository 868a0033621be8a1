//! Probe client library for ModelProbe.
//!
//! Sends a single chat completion to a provider and hands back the text.
//! The runner only sees the [`ProbeClient`] trait; [`HttpProbeClient`] is the
//! implementation for OpenAI-compatible endpoints.

pub mod client;
pub mod error;
pub mod http;
mod types;

pub use client::{ProbeClient, ProbeRequest};
pub use error::ClientError;
pub use http::HttpProbeClient;
