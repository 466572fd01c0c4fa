//! Client error types.
//!
//! Every failure surfaces to the caller unchanged in substance; the variants
//! only classify where it happened.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Sending the request or reading the response body failed.
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status. `body` is `None` when
    /// the error body itself could not be read.
    #[error("Backend returned {status}{}", describe_body(.body))]
    Status {
        status: StatusCode,
        body: Option<String>,
    },

    /// The response body was not valid JSON.
    #[error("Invalid response: {0}")]
    InvalidResponse(#[source] serde_json::Error),

    #[error("Invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Unsupported URL scheme for event stream: {0}")]
    UnsupportedScheme(String),

    /// WebSocket handshake or transport failure.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// A streamed text frame was not valid JSON.
    #[error("Invalid server event: {0}")]
    InvalidEvent(#[source] serde_json::Error),
}

impl ClientError {
    /// HTTP status of a `Status` error.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Error body sent with a non-success status, if it could be read.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. } => body.as_deref(),
            _ => None,
        }
    }

    /// Whether the backend reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

fn describe_body(body: &Option<String>) -> String {
    match body {
        Some(body) => format!(": {}", body),
        None => " (body unreadable)".to_string(),
    }
}
