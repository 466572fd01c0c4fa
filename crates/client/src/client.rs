//! HTTP client for the download backend
//!
//! Each operation issues exactly one request and hands back the backend's JSON
//! body as a `serde_json::Value`. Nothing is interpreted or validated locally.

use reqwest::{Client, Response};
use serde_json::Value;

use ourtube_protocol::DownloadRequest;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::events::{EventConnection, EventStream};

/// Client for the OurTube backend
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
    events_url: String,
}

impl BackendClient {
    /// Build a client for the configured backend.
    ///
    /// Fails only if the WebSocket URL cannot be derived from `base_url`.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        Ok(Self {
            client: Client::new(),
            events_url: config.resolve_events_url()?,
            base_url: config.http_base(),
        })
    }

    /// Create client from `OURTUBE_*` environment variables.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::new(ClientConfig::from_env())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn events_url(&self) -> &str {
        &self.events_url
    }

    /// Ask the backend to start a download.
    ///
    /// `DownloadRequest::new(url)` gives format and quality `"best"`.
    pub async fn start_download(&self, request: &DownloadRequest) -> Result<Value, ClientError> {
        tracing::debug!(url = %request.url, format = %request.format, quality = %request.quality, "Starting download");

        let response = self
            .client
            .post(self.downloads_url())
            .json(request)
            .send()
            .await?;

        read_json(response).await
    }

    /// List the files the backend has downloaded.
    pub async fn list_downloads(&self) -> Result<Value, ClientError> {
        tracing::debug!("Listing downloads");

        let response = self.client.get(self.downloads_url()).send().await?;

        read_json(response).await
    }

    /// Delete a downloaded file.
    ///
    /// `filename` is appended to the path as given, without escaping. URL
    /// parsing still percent-encodes characters a path cannot hold, such as
    /// spaces; existing escapes are left alone.
    pub async fn delete_download(&self, filename: &str) -> Result<Value, ClientError> {
        tracing::debug!(filename, "Deleting download");

        let response = self
            .client
            .delete(format!("{}/{}", self.downloads_url(), filename))
            .send()
            .await?;

        read_json(response).await
    }

    /// Backend liveness message from `GET /`.
    pub async fn backend_status(&self) -> Result<Value, ClientError> {
        let response = self
            .client
            .get(format!("{}/", self.base_url))
            .send()
            .await?;

        read_json(response).await
    }

    /// Absolute URL the backend serves a downloaded file from.
    pub fn file_url(&self, filename: &str) -> String {
        format!("{}/files/{}", self.base_url, filename)
    }

    /// Fetch the contents of a downloaded file.
    pub async fn fetch_file(&self, filename: &str) -> Result<Vec<u8>, ClientError> {
        tracing::debug!(filename, "Fetching file");

        let response = self.client.get(self.file_url(filename)).send().await?;
        let response = ensure_success(response).await?;

        Ok(response.bytes().await?.to_vec())
    }

    /// Open the event stream.
    pub async fn subscribe_events(&self) -> Result<EventStream, ClientError> {
        EventStream::connect(&self.events_url).await
    }

    /// Open the event stream and invoke `on_message` once per server event,
    /// in the order frames arrive.
    ///
    /// Frames that are not JSON are logged and skipped.
    pub async fn connect_events<F>(&self, on_message: F) -> Result<EventConnection, ClientError>
    where
        F: FnMut(Value) + Send + 'static,
    {
        let events = self.subscribe_events().await?;
        Ok(EventConnection::spawn(events, on_message))
    }

    fn downloads_url(&self) -> String {
        format!("{}/api/downloads", self.base_url)
    }
}

async fn ensure_success(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = match response.text().await {
        Ok(body) => Some(body),
        Err(e) => {
            tracing::debug!(error = %e, %status, "Failed to read error body");
            None
        }
    };
    Err(ClientError::Status { status, body })
}

async fn read_json(response: Response) -> Result<Value, ClientError> {
    let bytes = ensure_success(response).await?.bytes().await?;
    serde_json::from_slice(&bytes).map_err(ClientError::InvalidResponse)
}
