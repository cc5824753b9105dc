//! Remote collection errors.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to the REST API.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The request never completed.
    #[error("http error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A collection listing hit a route the server does not know.
    #[error("API route not found: {message}")]
    RouteNotFound {
        /// Server message or body text.
        message: String,
    },

    /// The server answered with a non-2xx status.
    #[error("server responded {status}: {message}")]
    Server {
        /// Response status.
        status: StatusCode,

        /// Server message, body text, or the status reason.
        message: String,
    },

    /// A success response carried a body that is not the expected JSON.
    #[error("malformed response body: {0}")]
    Parse(#[source] serde_json::Error),
}

impl RemoteError {
    /// HTTP status reported by the server, if the request got that far.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Server { status, .. } => Some(*status),
            Self::RouteNotFound { .. } => Some(StatusCode::NOT_FOUND),
            Self::Transport(error) => error.status(),
            Self::Parse(_) => None,
        }
    }
}
