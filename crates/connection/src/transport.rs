//! Transport seam between the manager and the socket implementation.

use tokio::sync::mpsc;

use crate::error::ConnectionError;
use crate::types::{InboundEvent, SessionId};

/// Opens sessions to a console endpoint.
pub trait Connector {
    /// Starts opening a session and returns without waiting for the
    /// handshake.
    ///
    /// Everything that happens afterwards is reported on `events`, tagged
    /// with `id`, ending with exactly one `Closed`.
    fn open(
        &self,
        id: SessionId,
        endpoint: &str,
        events: mpsc::Sender<InboundEvent>,
    ) -> Result<Box<dyn Session>, ConnectionError>;
}

/// Handle to an opened session.
pub trait Session: Send {
    /// Queues a text frame. Does not wait for delivery.
    fn send_text(&self, text: &str) -> Result<(), ConnectionError>;

    /// Asks the session to close. Completion is reported as `Closed`.
    fn close(&self);
}
