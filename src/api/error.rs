use serde::{Deserialize, Serialize};
use thiserror::Error;

/// `{message}` body carried by every non-success response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorEnvelope {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    /// Decode a raw error body. Anything that is not a `{message}` object
    /// yields an envelope without a message.
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }
}

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("remote store rejected the request ({status}): {}", .envelope.message.as_deref().unwrap_or("no message"))]
    Rejected { status: u16, envelope: ErrorEnvelope },

    #[error("failed to decode {what}: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl RemoteError {
    /// Server message verbatim when one was sent, `fallback` otherwise.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            RemoteError::Rejected { envelope, .. } => envelope
                .message
                .as_deref()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(fallback)
                .to_string(),
            RemoteError::Transport(_) | RemoteError::Decode { .. } => fallback.to_string(),
        }
    }
}
