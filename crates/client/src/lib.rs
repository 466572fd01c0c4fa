//! OurTube Client - Backend adapter
//!
//! Thin async wrapper over the download backend:
//! - REST operations on `/api/downloads` returning the backend's JSON verbatim
//! - A WebSocket subscription to `/ws` delivering push events, either as a
//!   [`EventStream`] or through a callback ([`EventConnection`])
//!
//! Errors propagate unmodified; there are no retries, timeouts or reconnects.

pub mod client;
pub mod config;
pub mod error;
pub mod events;

#[cfg(test)]
pub(crate) mod test_support;

pub use client::BackendClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::ClientError;
pub use events::{EventConnection, EventStream};

pub use ourtube_protocol as protocol;
