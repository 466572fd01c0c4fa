//! Typed views of REST responses
//!
//! The client returns raw JSON. Decode into these with
//! `serde_json::from_value` when the shape matters to the caller.

use serde::{Deserialize, Serialize};

/// One entry of `GET /api/downloads`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadRecord {
    pub filename: String,
    /// Size on disk in bytes
    pub size: u64,
    /// Backend-relative path to the file, e.g. `/files/clip.mp4`
    pub url: String,
}

/// Acknowledgement of `POST /api/downloads`
///
/// The download runs in the background; progress arrives as server events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadStarted {
    pub status: String,
    pub url: String,
}

/// Acknowledgement of `DELETE /api/downloads/{filename}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadDeleted {
    pub status: String,
    pub filename: String,
}

/// Body of `GET /`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendStatus {
    pub status: String,
}
