//! OurTube Protocol - Wire types shared with the download backend
//!
//! This crate contains the JSON shapes exchanged with the backend:
//! - REST request bodies (`DownloadRequest`)
//! - Typed views of REST responses (`DownloadRecord`, acknowledgements)
//! - Typed view of WebSocket push events (`ServerEvent`)
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde and serde_json
//! 2. **No business logic** - Pure data types and serialization
//! 3. **Opt-in typing** - The client hands out `serde_json::Value`; these types
//!    are for callers that want to interpret it

pub mod messages;
pub mod requests;
pub mod responses;

pub use messages::ServerEvent;
pub use requests::{
    formats, is_audio_format, max_height, qualities, DownloadRequest, DEFAULT_SELECTOR,
};
pub use responses::{BackendStatus, DownloadDeleted, DownloadRecord, DownloadStarted};
