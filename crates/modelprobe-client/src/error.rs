//! Error types for the probe client.

use thiserror::Error;

/// Errors a single probe call can end with.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The provider's credential variable is not set.
    #[error("missing credential: environment variable {0} is not set")]
    MissingCredential(String),

    /// No provider handle given and no default endpoint configured.
    #[error("no provider given and no default endpoint configured")]
    NoDefaultProvider,

    /// The body was not a chat completion.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The call ran past its deadline.
    #[error("request timed out")]
    Timeout,
}
