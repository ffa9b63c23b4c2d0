//! WebSocket write pump: serialises outbound frames.

use futures_util::SinkExt;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::pumps::emit;
use crate::types::{InboundEvent, SessionEvent, SessionId};

/// Writes queued frames to the socket until cancelled or the queue closes.
///
/// A write failure is reported as `ErrorOccurred` and cancels the session
/// so the read side winds down too. A close frame is attempted on the way
/// out unless the sink has already failed.
pub(crate) async fn write_pump<S>(
    mut write: S,
    mut write_rx: mpsc::Receiver<tungstenite::Message>,
    id: SessionId,
    events: mpsc::Sender<InboundEvent>,
    cancel: CancellationToken,
) where
    S: SinkExt<tungstenite::Message, Error = tungstenite::Error> + Unpin,
{
    let mut failed = false;
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            msg = write_rx.recv() => {
                let Some(m) = msg else { break };
                if let Err(e) = write.send(m).await {
                    warn!(session = %id, "WebSocket write error: {e}");
                    emit(&events, id, SessionEvent::ErrorOccurred(e.to_string())).await;
                    cancel.cancel();
                    failed = true;
                    break;
                }
            }
        }
    }

    // A failed sink must not be driven again.
    if !failed {
        let _ = write.send(tungstenite::Message::Close(None)).await;
    }
}
