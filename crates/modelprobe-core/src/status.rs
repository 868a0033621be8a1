//! Outcome classification for a single probe.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classified outcome of one probe call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProbeStatus {
    /// Non-empty text came back.
    Success,
    /// The call succeeded but the trimmed text was empty.
    EmptyResponse,
    /// The client reported a failure.
    Error,
    /// No answer within the per-task timeout.
    Timeout,
}

impl ProbeStatus {
    /// Returns true for the only status that counts as a working combination.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Wire/display label, identical to the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::EmptyResponse => "EMPTY_RESPONSE",
            Self::Error => "ERROR",
            Self::Timeout => "TIMEOUT",
        }
    }
}

impl fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
