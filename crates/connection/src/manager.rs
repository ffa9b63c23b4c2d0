//! Connection manager for the console session.
//!
//! Holds at most one session, derives its endpoint from the page location,
//! and turns inbound payloads into log entries. Every operation is
//! synchronous and meant to be called from a single event loop that also
//! drains [`ConnectionManager::take_events`].

use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, trace, warn};

use relay_console_log::{LogNotification, LogSequence, now_timestamp};
use relay_console_protocol::constants::OUTBOUND_ECHO_PREFIX;
use relay_console_protocol::{PageLocation, RelayCommand, split_payload};

use crate::error::ConnectionError;
use crate::transport::{Connector, Session};
use crate::types::{
    ConnectOutcome, InboundEvent, ManagerOptions, ManagerState, SendOutcome, SessionEvent,
    SessionId,
};

/// Depth of the inbound event queue shared by all sessions.
const EVENT_QUEUE_DEPTH: usize = 256;

/// The session currently held by the manager.
struct ActiveSession {
    id: SessionId,
    handle: Box<dyn Session>,
    open: bool,
}

/// Owns the console session and the log it feeds.
pub struct ConnectionManager<C: Connector> {
    connector: C,
    location: PageLocation,
    options: ManagerOptions,
    clock: fn() -> String,
    session: Option<ActiveSession>,
    next_id: u64,
    log: LogSequence,
    events_tx: mpsc::Sender<InboundEvent>,
    events_rx: Option<mpsc::Receiver<InboundEvent>>,
}

impl<C: Connector> ConnectionManager<C> {
    /// Creates an idle manager for the page at `location`.
    pub fn new(connector: C, location: PageLocation, options: ManagerOptions) -> Self {
        let (events_tx, events_rx) = mpsc::channel(EVENT_QUEUE_DEPTH);

        Self {
            connector,
            location,
            options,
            clock: now_timestamp,
            session: None,
            next_id: 1,
            log: LogSequence::new(),
            events_tx,
            events_rx: Some(events_rx),
        }
    }

    /// Replaces the source of entry timestamps.
    pub fn with_clock(mut self, clock: fn() -> String) -> Self {
        self.clock = clock;
        self
    }

    /// Takes the inbound event receiver. Can only be called once.
    ///
    /// Feed every received event back into [`handle_event`](Self::handle_event).
    pub fn take_events(&mut self) -> Option<mpsc::Receiver<InboundEvent>> {
        self.events_rx.take()
    }

    /// The socket endpoint derived from the page location.
    pub fn endpoint(&self) -> String {
        self.location.websocket_endpoint()
    }

    pub fn state(&self) -> ManagerState {
        match &self.session {
            None => ManagerState::Idle,
            Some(s) if s.open => ManagerState::Open(s.id),
            Some(s) => ManagerState::Connecting(s.id),
        }
    }

    /// Whether a session is held, open or still handshaking.
    pub fn is_connected(&self) -> bool {
        self.session.is_some()
    }

    /// Everything received so far, oldest first.
    pub fn log(&self) -> &LogSequence {
        &self.log
    }

    /// Registers a view for log change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<LogNotification> {
        self.log.subscribe()
    }

    /// Starts a session unless one is already held.
    ///
    /// Returns as soon as the transport has been asked to connect; the
    /// handshake result arrives later as an event.
    pub fn connect(&mut self) -> Result<ConnectOutcome, ConnectionError> {
        if let Some(active) = &self.session {
            debug!(session = %active.id, "connect ignored, session already held");
            return Ok(ConnectOutcome::AlreadyConnected(active.id));
        }

        let endpoint = self.location.websocket_endpoint();
        let id = SessionId(self.next_id);
        let handle = self
            .connector
            .open(id, &endpoint, self.events_tx.clone())
            .inspect_err(|e| warn!(endpoint = %endpoint, error = %e, "cannot open session"))?;
        self.next_id += 1;

        info!(session = %id, endpoint = %endpoint, "connecting");
        self.session = Some(ActiveSession {
            id,
            handle,
            open: false,
        });
        Ok(ConnectOutcome::Started(id))
    }

    /// Applies one event reported by a session.
    ///
    /// Events from a session other than the one currently held are stale
    /// and ignored.
    pub fn handle_event(&mut self, event: InboundEvent) {
        let InboundEvent { session, event } = event;
        let Some(active) = self.session.as_mut().filter(|s| s.id == session) else {
            debug!(session = %session, ?event, "ignoring event from stale session");
            return;
        };

        match event {
            SessionEvent::Opened => {
                active.open = true;
                info!(session = %session, "connection open");
            }
            SessionEvent::Closed => {
                self.session = None;
                info!(session = %session, "connection closed");
            }
            SessionEvent::ErrorOccurred(detail) => {
                warn!(session = %session, error = %detail, "connection error");
            }
            SessionEvent::MessageReceived(payload) => self.on_message(&payload),
        }
    }

    /// Sends a relay toggle. Ignored when no session is held.
    pub fn send_command(&mut self, command: RelayCommand) -> SendOutcome {
        let Some(active) = &self.session else {
            debug!(%command, "not connected, command ignored");
            return SendOutcome::NotConnected;
        };

        if let Err(e) = active.handle.send_text(command.as_wire()) {
            warn!(session = %active.id, %command, error = %e, "command not sent");
            return SendOutcome::Dropped;
        }
        debug!(session = %active.id, %command, "command sent");

        if self.options.echo_outbound {
            let timestamp = (self.clock)();
            self.log
                .append_batch([format!("{OUTBOUND_ECHO_PREFIX}{command}")], &timestamp);
        }
        SendOutcome::Sent
    }

    /// Asks the held session to close.
    ///
    /// The manager stays active until the session reports `Closed`.
    /// Returns `false` when there was nothing to close.
    pub fn close(&mut self) -> bool {
        match &self.session {
            Some(active) => {
                info!(session = %active.id, "closing connection");
                active.handle.close();
                true
            }
            None => false,
        }
    }

    /// Fans one payload out into log entries sharing a single timestamp.
    fn on_message(&mut self, payload: &str) {
        let timestamp = (self.clock)();
        let count = self.log.append_batch(split_payload(payload), &timestamp);
        trace!(bytes = payload.len(), entries = count, "payload ingested");
    }
}
