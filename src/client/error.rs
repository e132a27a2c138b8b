//! Client-side error type

use reqwest::StatusCode;
use serde::Deserialize;

/// Shown when the server gives no usable message
pub const FALLBACK_MESSAGE: &str = "Something went wrong";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Non-success HTTP response
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Session storage error: {0}")]
    Storage(String),
}

impl ClientError {
    /// Build an `Api` error from a response body.
    ///
    /// Reads `{"error":{"message"}}` and the flat `{"message"}` form; anything
    /// else gets [`FALLBACK_MESSAGE`].
    pub fn from_body(status: StatusCode, body: &[u8]) -> Self {
        #[derive(Deserialize)]
        struct Nested {
            error: Flat,
        }

        #[derive(Deserialize)]
        struct Flat {
            message: String,
        }

        let message = serde_json::from_slice::<Nested>(body)
            .map(|b| b.error.message)
            .or_else(|_| serde_json::from_slice::<Flat>(body).map(|b| b.message))
            .ok()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_MESSAGE.to_string());

        ClientError::Api { status, message }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}
