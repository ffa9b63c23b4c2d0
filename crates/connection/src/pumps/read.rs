//! WebSocket read pump: forwards inbound frames as session events.

use futures_util::StreamExt;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use crate::pumps::emit;
use crate::types::{InboundEvent, SessionEvent, SessionId};

/// Reads frames until the peer closes, the stream fails or `cancel` fires.
///
/// Text frames become `MessageReceived`; a read failure becomes
/// `ErrorOccurred`. Control frames are answered by tungstenite itself.
pub(crate) async fn read_pump<S>(
    mut read: S,
    id: SessionId,
    events: mpsc::Sender<InboundEvent>,
    cancel: CancellationToken,
) where
    S: StreamExt<Item = Result<tungstenite::Message, tungstenite::Error>> + Unpin,
{
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,

            msg = read.next() => {
                match msg {
                    Some(Ok(tungstenite::Message::Text(text))) => {
                        trace!(session = %id, bytes = text.len(), "received text frame");
                        let event = SessionEvent::MessageReceived(text.as_str().to_owned());
                        if !emit(&events, id, event).await {
                            break;
                        }
                    }
                    Some(Ok(tungstenite::Message::Close(frame))) => {
                        debug!(session = %id, ?frame, "received close frame");
                        break;
                    }
                    Some(Ok(tungstenite::Message::Ping(_))) => {
                        trace!(session = %id, "received ping");
                    }
                    Some(Ok(_)) => {} // Binary / Pong: ignore
                    Some(Err(e)) => {
                        warn!(session = %id, "WebSocket read error: {e}");
                        emit(&events, id, SessionEvent::ErrorOccurred(e.to_string())).await;
                        break;
                    }
                    None => {
                        debug!(session = %id, "WebSocket stream ended");
                        break;
                    }
                }
            }
        }
    }
}
