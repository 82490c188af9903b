//! Client error type

use thiserror::Error;

/// Errors returned by [`crate::GitHubClient`] and [`crate::WorkItemProvider`]
/// implementations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// GitHub answered with a non-success status.
    #[error("GitHub API returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The request never produced a GitHub response (network, decoding, ...).
    #[error("GitHub request failed: {0}")]
    Transport(String),

    /// A work-item lookup failed.
    #[error("Work item {id} lookup failed: {reason}")]
    WorkItem { id: u32, reason: String },
}

impl ClientError {
    /// Upstream HTTP status, if GitHub produced one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<octocrab::Error> for ClientError {
    fn from(err: octocrab::Error) -> Self {
        match err {
            octocrab::Error::GitHub { source, .. } => ClientError::Api {
                status: source.status_code.as_u16(),
                message: source.message.clone(),
            },
            other => ClientError::Transport(other.to_string()),
        }
    }
}
