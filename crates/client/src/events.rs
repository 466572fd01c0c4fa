//! WebSocket event subscription using tokio-tungstenite
//!
//! A background task owns the socket and forwards every text frame, parsed as
//! JSON, into an unbounded channel in receipt order. [`EventStream`] exposes
//! that channel as a `Stream`; [`EventConnection`] drains it into a callback.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::{Stream, StreamExt};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

use crate::error::ClientError;

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;
type EventResult = Result<Value, ClientError>;

/// Server events as a lazy, non-restartable stream.
///
/// Yields `Err(ClientError::InvalidEvent)` for a frame that is not JSON and
/// keeps going. A transport failure is yielded once, then the stream ends.
/// The stream also ends when the server closes the connection.
pub struct EventStream {
    rx: mpsc::UnboundedReceiver<EventResult>,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl EventStream {
    pub(crate) async fn connect(url: &str) -> Result<Self, ClientError> {
        let (socket, _response) = connect_async(url).await?;
        tracing::debug!(url, "Connected to event stream");

        let (tx, rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let task = tokio::spawn(pump_frames(socket, tx, shutdown_rx));

        Ok(Self {
            rx,
            shutdown: Some(shutdown_tx),
            task: Some(task),
        })
    }

    /// Close the connection. No further events are delivered.
    pub async fn close(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        self.rx.close();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "Event stream task failed");
            }
        }
    }
}

impl Stream for EventStream {
    type Item = EventResult;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

/// Read frames until the server closes, the transport fails, or shutdown is
/// requested. Dropping the shutdown sender counts as a request.
async fn pump_frames(
    mut socket: Socket,
    tx: mpsc::UnboundedSender<EventResult>,
    mut shutdown: oneshot::Receiver<()>,
) {
    loop {
        tokio::select! {
            _ = &mut shutdown => {
                if let Err(e) = socket.close(None).await {
                    tracing::debug!(error = %e, "Close handshake failed");
                }
                tracing::debug!("Event stream closed by client");
                break;
            }
            frame = socket.next() => {
                let Some(frame) = frame else {
                    break;
                };
                match frame {
                    Ok(Message::Text(text)) => {
                        let event = serde_json::from_str::<Value>(&text)
                            .map_err(ClientError::InvalidEvent);
                        if tx.send(event).is_err() {
                            break;
                        }
                    }
                    Ok(Message::Close(_)) => {
                        tracing::debug!("Server closed event stream");
                        break;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        let _ = tx.send(Err(e.into()));
                        break;
                    }
                }
            }
        }
    }
}

/// Live callback subscription returned by `BackendClient::connect_events`.
///
/// The caller owns the lifecycle: after [`close`](Self::close) returns, the
/// handler is never invoked again. Dropping the handle also stops delivery.
/// A transport failure ends delivery and is returned from `close` or
/// [`wait`](Self::wait).
pub struct EventConnection {
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<Option<ClientError>>>,
}

impl EventConnection {
    pub(crate) fn spawn<F>(mut events: EventStream, mut on_message: F) -> Self
    where
        F: FnMut(Value) + Send + 'static,
    {
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let failure = loop {
                tokio::select! {
                    biased;
                    _ = &mut shutdown_rx => break None,
                    item = events.next() => match item {
                        Some(Ok(value)) => on_message(value),
                        Some(Err(ClientError::InvalidEvent(e))) => {
                            tracing::warn!(error = %e, "Dropping malformed server event");
                        }
                        Some(Err(e)) => break Some(e),
                        None => break None,
                    },
                }
            };
            events.close().await;
            failure
        });

        Self {
            shutdown: Some(shutdown_tx),
            task: Some(task),
        }
    }

    /// Whether the connection is still delivering events.
    pub fn is_open(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Close the connection and wait for the delivery task to stop.
    ///
    /// Returns the transport error if the connection had already failed.
    pub async fn close(mut self) -> Result<(), ClientError> {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        self.join().await
    }

    /// Wait until the server ends the connection.
    ///
    /// `Ok(())` after a clean close, the transport error otherwise.
    pub async fn wait(mut self) -> Result<(), ClientError> {
        self.join().await
    }

    async fn join(&mut self) -> Result<(), ClientError> {
        let Some(task) = self.task.take() else {
            return Ok(());
        };
        match task.await {
            Ok(Some(e)) => Err(e),
            Ok(None) => Ok(()),
            // A panicking handler panics the caller.
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(_) => Ok(()),
        }
    }
}
