use serde_json::Value;
use thiserror::Error;

/// Why a single upstream request produced no data
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection failure, timeout, or a non-2xx HTTP status
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The body was not a JSON object
    #[error("response is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Valid JSON whose business code is not the success code
    #[error("business code {code}, msg={message}")]
    Business { code: Value, message: String },
}

/// The three failure classes, without their payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    Transport,
    Malformed,
    Business,
}

impl FetchError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Transport(_) => FailureKind::Transport,
            Self::Malformed(_) => FailureKind::Malformed,
            Self::Business { .. } => FailureKind::Business,
        }
    }

    /// HTTP status, when the failure was a non-2xx response
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
