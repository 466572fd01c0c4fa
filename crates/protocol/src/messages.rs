//! WebSocket push events from the backend
//!
//! The backend broadcasts one JSON object per text frame on `/ws`. Each object
//! carries a `type` discriminator.

use serde::{Deserialize, Serialize};

// =============================================================================
// Server Events (Backend → Client)
// =============================================================================

/// Events pushed by the backend while downloads run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    /// A download advanced. `status` is `initializing`, `downloading` or `merging`.
    Progress {
        id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        filename: Option<String>,
        status: String,
        /// Preformatted percentage, e.g. `"42.0%"`
        #[serde(default, skip_serializing_if = "Option::is_none")]
        percent: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        speed: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        eta: Option<String>,
    },
    /// A download and its post-processing completed
    Finished { id: String, status: String },
    /// A download failed
    Error { url: String, id: String, error: String },
}

impl ServerEvent {
    /// Interpret a raw event received from the stream.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(value)
    }

    /// Identifier of the download the event refers to
    pub fn download_id(&self) -> &str {
        match self {
            ServerEvent::Progress { id, .. }
            | ServerEvent::Finished { id, .. }
            | ServerEvent::Error { id, .. } => id,
        }
    }

    /// Whether no further events follow for this download
    pub fn is_terminal(&self) -> bool {
        matches!(self, ServerEvent::Finished { .. } | ServerEvent::Error { .. })
    }
}
