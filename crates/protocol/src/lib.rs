//! Wire protocol for the relay console.
//!
//! The console talks to its server over a single text WebSocket. Outbound
//! traffic is limited to the relay toggle commands; inbound traffic is free
//! text where `;;` separates the lines to display.

pub mod command;
pub mod constants;
pub mod error;
pub mod location;
pub mod payload;

// Re-export primary types for convenience.
pub use command::RelayCommand;
pub use error::ProtocolError;
pub use location::PageLocation;
pub use payload::split_payload;
