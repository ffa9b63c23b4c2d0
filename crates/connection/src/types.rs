//! Public types for the connection manager.

use std::fmt;

/// Identifies one session opened by a manager.
///
/// Ids increase monotonically so events from a session that has already
/// been replaced can be told apart from the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Things that happen on a session, reported by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Handshake completed.
    Opened,
    /// The session ended, cleanly or not. Always the last event.
    Closed,
    /// A text frame arrived.
    MessageReceived(String),
    /// Transport failure. A `Closed` event normally follows.
    ErrorOccurred(String),
}

/// A [`SessionEvent`] tagged with the session it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    pub session: SessionId,
    pub event: SessionEvent,
}

impl InboundEvent {
    pub fn new(session: SessionId, event: SessionEvent) -> Self {
        Self { session, event }
    }
}

/// Connection state as seen by the manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerState {
    /// No session held; `connect` is allowed.
    Idle,
    /// Session held, handshake still pending.
    Connecting(SessionId),
    /// Session held and open.
    Open(SessionId),
}

impl ManagerState {
    /// Whether a session is held, whatever its handshake progress.
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Result of [`ConnectionManager::connect`](crate::ConnectionManager::connect).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// A new session was started.
    Started(SessionId),
    /// A session is already held; nothing was done.
    AlreadyConnected(SessionId),
}

/// Result of [`ConnectionManager::send_command`](crate::ConnectionManager::send_command).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Handed to the transport.
    Sent,
    /// No session held; nothing was sent.
    NotConnected,
    /// The transport refused the frame (writer gone or queue full).
    Dropped,
}

/// Behavior switches for the connection manager.
#[derive(Debug, Clone, Default)]
pub struct ManagerOptions {
    /// Also log outbound commands as `SEND: <command>` entries.
    pub echo_outbound: bool,
}
