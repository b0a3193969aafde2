use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced by the API client.
///
/// `Transport` and `Status` make up the transport-error taxonomy the console
/// reacts to; an empty-but-well-formed payload is not an error and is
/// represented in the response types instead.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to decode response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ClientError {
    /// Whether a retry could plausibly succeed: network failures and 5xx.
    /// Client errors (4xx) and malformed bodies are not retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status { status, .. } => status.is_server_error(),
            Self::Decode(_) => false,
        }
    }
}
