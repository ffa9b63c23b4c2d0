//! WebSocket transport for the console session.
//!
//! Each session runs on its own task: handshake, then a read pump and a
//! write pump. The manager only ever sees the events they report.

use futures_util::StreamExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::handshake::client::Request;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use relay_console_protocol::constants::WS_MAX_MESSAGE_SIZE;

use crate::error::ConnectionError;
use crate::pumps::emit;
use crate::transport::{Connector, Session};
use crate::types::{InboundEvent, SessionEvent, SessionId};

/// Outbound frames buffered per session before sends are refused.
const WRITE_QUEUE_DEPTH: usize = 64;

/// [`Connector`] backed by tokio-tungstenite.
///
/// Must be used from within a tokio runtime.
#[derive(Debug, Clone, Default)]
pub struct WsConnector;

impl WsConnector {
    pub fn new() -> Self {
        Self
    }
}

impl Connector for WsConnector {
    fn open(
        &self,
        id: SessionId,
        endpoint: &str,
        events: mpsc::Sender<InboundEvent>,
    ) -> Result<Box<dyn Session>, ConnectionError> {
        let request =
            endpoint
                .into_client_request()
                .map_err(|source| ConnectionError::InvalidEndpoint {
                    endpoint: endpoint.to_owned(),
                    source,
                })?;
        Ok(Box::new(WsSession::spawn(id, request, events)))
    }
}

/// Handle to a running WebSocket session.
///
/// Dropping the handle cancels the session.
pub struct WsSession {
    write_tx: mpsc::Sender<tungstenite::Message>,
    cancel: CancellationToken,
    _task: JoinHandle<()>,
}

impl WsSession {
    fn spawn(id: SessionId, request: Request, events: mpsc::Sender<InboundEvent>) -> Self {
        let (write_tx, write_rx) = mpsc::channel(WRITE_QUEUE_DEPTH);
        let cancel = CancellationToken::new();
        let task = tokio::spawn(run_session(id, request, write_rx, events, cancel.clone()));

        Self {
            write_tx,
            cancel,
            _task: task,
        }
    }
}

impl Session for WsSession {
    fn send_text(&self, text: &str) -> Result<(), ConnectionError> {
        self.write_tx
            .try_send(tungstenite::Message::Text(text.into()))
            .map_err(|e| match e {
                mpsc::error::TrySendError::Full(_) => ConnectionError::QueueFull,
                mpsc::error::TrySendError::Closed(_) => ConnectionError::Closed,
            })
    }

    fn close(&self) {
        self.cancel.cancel();
    }
}

impl Drop for WsSession {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Drives one session from handshake to `Closed`.
///
/// Frames queued before the handshake completes are sent once it does.
async fn run_session(
    id: SessionId,
    request: Request,
    write_rx: mpsc::Receiver<tungstenite::Message>,
    events: mpsc::Sender<InboundEvent>,
    cancel: CancellationToken,
) {
    let mut ws_config = tungstenite::protocol::WebSocketConfig::default();
    ws_config.max_message_size = Some(WS_MAX_MESSAGE_SIZE);
    ws_config.max_frame_size = Some(WS_MAX_MESSAGE_SIZE);

    let handshake = tokio_tungstenite::connect_async_with_config(request, Some(ws_config), false);
    let ws_stream = tokio::select! {
        _ = cancel.cancelled() => {
            debug!(session = %id, "closed before handshake completed");
            emit(&events, id, SessionEvent::Closed).await;
            return;
        }
        result = handshake => match result {
            Ok((stream, _)) => stream,
            Err(e) => {
                let err = ConnectionError::from(e);
                warn!(session = %id, error = %err, "handshake failed");
                emit(&events, id, SessionEvent::ErrorOccurred(err.to_string())).await;
                emit(&events, id, SessionEvent::Closed).await;
                return;
            }
        }
    };

    info!(session = %id, "WebSocket connection established");
    emit(&events, id, SessionEvent::Opened).await;

    let (write, read) = ws_stream.split();
    let writer = tokio::spawn(crate::pumps::write::write_pump(
        write,
        write_rx,
        id,
        events.clone(),
        cancel.clone(),
    ));

    crate::pumps::read::read_pump(read, id, events.clone(), cancel.clone()).await;

    // Stop the writer; it sends our close frame on the way out.
    cancel.cancel();
    let _ = writer.await;

    emit(&events, id, SessionEvent::Closed).await;
}
