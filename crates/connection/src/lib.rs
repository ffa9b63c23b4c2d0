//! Connection manager for the relay console.
//!
//! Owns the single WebSocket session to the console server, turns inbound
//! messages into log entries and sends the relay toggle commands.

pub mod error;
pub mod manager;
pub(crate) mod pumps;
pub mod transport;
pub mod types;
pub mod ws_client;

pub use error::ConnectionError;
pub use manager::ConnectionManager;
pub use transport::{Connector, Session};
pub use types::{
    ConnectOutcome, InboundEvent, ManagerOptions, ManagerState, SendOutcome, SessionEvent,
    SessionId,
};
pub use ws_client::{WsConnector, WsSession};
