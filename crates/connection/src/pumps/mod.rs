pub(crate) mod read;
pub(crate) mod write;

use tokio::sync::mpsc;

use crate::types::{InboundEvent, SessionEvent, SessionId};

/// Forwards a session event to the manager's queue.
///
/// Returns `false` once the manager side has gone away.
pub(crate) async fn emit(
    events: &mpsc::Sender<InboundEvent>,
    id: SessionId,
    event: SessionEvent,
) -> bool {
    events.send(InboundEvent::new(id, event)).await.is_ok()
}
