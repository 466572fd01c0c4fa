//! In-process backends for client tests.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::ws::{Message as WsMessage, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use crate::{BackendClient, ClientConfig};

/// A request as the backend saw it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Clone, Default)]
pub(crate) struct Recorder(Arc<Mutex<Vec<RecordedRequest>>>);

impl Recorder {
    fn record(&self, method: Method, uri: &Uri, body: Option<Value>) {
        self.0.lock().unwrap().push(RecordedRequest {
            method,
            path: uri.path().to_string(),
            body,
        });
    }

    pub(crate) fn requests(&self) -> Vec<RecordedRequest> {
        self.0.lock().unwrap().clone()
    }
}

pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub(crate) async fn spawn_server(router: Router) -> (SocketAddr, tokio::task::JoinHandle<()>) {
    init_tracing();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (addr, handle)
}

pub(crate) fn client_for(addr: SocketAddr) -> BackendClient {
    BackendClient::new(ClientConfig::new(format!("http://{}", addr))).unwrap()
}

// =============================================================================
// REST surface
// =============================================================================

/// Backend serving `clip.mp4` as its only download.
pub(crate) fn downloads_router(recorder: Recorder) -> Router {
    Router::new()
        .route(
            "/",
            get(|| async { Json(json!({"status": "OurTube Backend Running"})) }),
        )
        .route("/api/downloads", get(list_downloads).post(start_download))
        .route("/api/downloads/{filename}", delete(delete_download))
        .route("/files/{filename}", get(serve_file))
        .with_state(recorder)
}

async fn start_download(
    State(recorder): State<Recorder>,
    uri: Uri,
    Json(body): Json<Value>,
) -> Json<Value> {
    recorder.record(Method::POST, &uri, Some(body.clone()));
    Json(json!({"status": "started", "url": body["url"]}))
}

async fn list_downloads(State(recorder): State<Recorder>, uri: Uri) -> Json<Value> {
    recorder.record(Method::GET, &uri, None);
    Json(json!([
        {"filename": "clip.mp4", "size": 1024, "url": "/files/clip.mp4"}
    ]))
}

async fn delete_download(
    State(recorder): State<Recorder>,
    uri: Uri,
    Path(filename): Path<String>,
) -> (StatusCode, Json<Value>) {
    recorder.record(Method::DELETE, &uri, None);
    if filename == "missing.mp4" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"detail": "File not found"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({"status": "deleted", "filename": filename})),
    )
}

async fn serve_file(Path(filename): Path<String>) -> Response {
    if filename == "clip.mp4" {
        (StatusCode::OK, b"media-bytes".to_vec()).into_response()
    } else {
        (StatusCode::NOT_FOUND, "Not Found").into_response()
    }
}

// =============================================================================
// Event stream
// =============================================================================

/// `/ws` endpoint that sends `frames` in order, then closes.
pub(crate) fn scripted_events_router(frames: Vec<WsMessage>) -> Router {
    Router::new().route(
        "/ws",
        get(move |ws: WebSocketUpgrade| {
            let frames = frames.clone();
            async move { ws.on_upgrade(move |socket| send_then_close(socket, frames)) }
        }),
    )
}

async fn send_then_close(mut socket: WebSocket, frames: Vec<WsMessage>) {
    for frame in frames {
        if socket.send(frame).await.is_err() {
            return;
        }
    }
    let _ = socket.send(WsMessage::Close(None)).await;
}

/// `/ws` endpoint that sends `frames`, then drops the TCP connection without
/// a close frame.
pub(crate) fn dropping_events_router(frames: Vec<WsMessage>) -> Router {
    Router::new().route(
        "/ws",
        get(move |ws: WebSocketUpgrade| {
            let frames = frames.clone();
            async move { ws.on_upgrade(move |socket| send_then_drop(socket, frames)) }
        }),
    )
}

async fn send_then_drop(mut socket: WebSocket, frames: Vec<WsMessage>) {
    for frame in frames {
        if socket.send(frame).await.is_err() {
            return;
        }
    }
    drop(socket);
}

/// `/ws` endpoint pushing `{"tick": n}` every 10ms until the client goes away.
pub(crate) fn ticking_events_router() -> Router {
    Router::new().route(
        "/ws",
        get(|ws: WebSocketUpgrade| async move { ws.on_upgrade(tick_forever) }),
    )
}

async fn tick_forever(mut socket: WebSocket) {
    let mut interval = tokio::time::interval(Duration::from_millis(10));
    for tick in 0u64.. {
        interval.tick().await;
        let frame = WsMessage::Text(json!({ "tick": tick }).to_string().into());
        if socket.send(frame).await.is_err() {
            break;
        }
    }
}

pub(crate) fn text_frame(json: &str) -> WsMessage {
    WsMessage::Text(json.to_string().into())
}
