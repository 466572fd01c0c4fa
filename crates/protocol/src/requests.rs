//! Request bodies for the downloads resource
//!
//! The backend owns validation. Format and quality values are plain strings;
//! the constants below name the values the backend understands today.

use serde::{Deserialize, Serialize};

/// Format and quality selector applied when the caller does not pick one.
pub const DEFAULT_SELECTOR: &str = "best";

/// Output formats understood by the backend.
pub mod formats {
    pub const BEST: &str = "best";
    pub const MP4: &str = "mp4";
    pub const ANY: &str = "any";
    /// Fetch the thumbnail only, skipping the media download.
    pub const THUMBNAIL: &str = "thumbnail";
    pub const MP3: &str = "mp3";
    pub const M4A: &str = "m4a";
    pub const OPUS: &str = "opus";
    pub const WAV: &str = "wav";
    pub const FLAC: &str = "flac";

    /// Formats the backend treats as audio extraction.
    pub const AUDIO: [&str; 5] = [MP3, M4A, OPUS, WAV, FLAC];
}

/// Quality selectors understood by the backend.
///
/// Besides these, a height such as `"720p"` caps the video resolution.
pub mod qualities {
    pub const BEST: &str = "best";
    /// Prefer mp4/m4a streams playable on iOS.
    pub const BEST_IOS: &str = "best_ios";
    pub const WORST: &str = "worst";
}

/// Whether the backend extracts audio only for this format.
pub fn is_audio_format(format: &str) -> bool {
    formats::AUDIO.contains(&format)
}

/// Height cap encoded in a quality selector like `"1080p"`.
pub fn max_height(quality: &str) -> Option<u32> {
    quality.strip_suffix('p')?.parse().ok()
}

fn default_selector() -> String {
    DEFAULT_SELECTOR.to_string()
}

/// Body of `POST /api/downloads`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadRequest {
    /// Media page URL, passed through unvalidated
    pub url: String,
    #[serde(default = "default_selector")]
    pub format: String,
    #[serde(default = "default_selector")]
    pub quality: String,
}

impl DownloadRequest {
    /// Request for `url` with format and quality both `"best"`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            format: default_selector(),
            quality: default_selector(),
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn with_quality(mut self, quality: impl Into<String>) -> Self {
        self.quality = quality.into();
        self
    }
}
