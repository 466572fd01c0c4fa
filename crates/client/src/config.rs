//! Client configuration
//!
//! The backend origin is explicit configuration rather than a constant, so the
//! same client can target a local backend, a LAN device or a test server.

use url::Url;

use crate::error::ClientError;

/// Default backend origin.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Environment variable overriding [`ClientConfig::base_url`].
pub const BASE_URL_ENV: &str = "OURTUBE_BASE_URL";

/// Environment variable overriding [`ClientConfig::events_url`].
pub const EVENTS_URL_ENV: &str = "OURTUBE_EVENTS_URL";

/// Path of the WebSocket endpoint relative to the origin.
const EVENTS_PATH: &str = "/ws";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// HTTP origin of the backend, e.g. `http://localhost:8000`
    pub base_url: String,
    /// Full WebSocket URL. Derived from `base_url` when `None`.
    pub events_url: Option<String>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            events_url: None,
        }
    }

    pub fn with_events_url(mut self, events_url: impl Into<String>) -> Self {
        self.events_url = Some(events_url.into());
        self
    }

    /// Create config from environment variables.
    ///
    /// Loads a `.env` file if present, then reads `OURTUBE_BASE_URL` and
    /// `OURTUBE_EVENTS_URL`, falling back to defaults if not set.
    pub fn from_env() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "Loaded .env");
        }
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            base_url: lookup(BASE_URL_ENV).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            events_url: lookup(EVENTS_URL_ENV),
        }
    }

    /// Origin with trailing slashes removed, ready for path concatenation.
    pub(crate) fn http_base(&self) -> String {
        self.base_url.trim_end_matches('/').to_string()
    }

    /// WebSocket URL of the event stream.
    ///
    /// `http` maps to `ws` and `https` to `wss`; any path prefix on the
    /// origin is kept.
    pub fn resolve_events_url(&self) -> Result<String, ClientError> {
        if let Some(events_url) = &self.events_url {
            return Ok(events_url.clone());
        }

        let mut url = Url::parse(&self.base_url)?;
        let scheme = match url.scheme() {
            "http" | "ws" => "ws",
            "https" | "wss" => "wss",
            other => return Err(ClientError::UnsupportedScheme(other.to_string())),
        };
        url.set_scheme(scheme)
            .map_err(|_| ClientError::UnsupportedScheme(url.scheme().to_string()))?;

        Ok(format!("{}{}", url.as_str().trim_end_matches('/'), EVENTS_PATH))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
