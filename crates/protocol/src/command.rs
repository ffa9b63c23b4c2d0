use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{CMD_SERVER_TCP_OFF, CMD_SERVER_TCP_ON};
use crate::error::ProtocolError;

/// Toggle sent to the server to control its TCP relay.
///
/// Serializes as the exact text frame put on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelayCommand {
    #[serde(rename = "serverTcpOn")]
    On,
    #[serde(rename = "serverTcpOff")]
    Off,
}

impl RelayCommand {
    /// The literal text frame for this command.
    pub fn as_wire(self) -> &'static str {
        match self {
            Self::On => CMD_SERVER_TCP_ON,
            Self::Off => CMD_SERVER_TCP_OFF,
        }
    }
}

impl fmt::Display for RelayCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// Accepts the UI action names (`on`, `off`) as well as the wire literals.
impl FromStr for RelayCommand {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "on" | CMD_SERVER_TCP_ON => Ok(Self::On),
            "off" | CMD_SERVER_TCP_OFF => Ok(Self::Off),
            other => Err(ProtocolError::UnknownCommand(other.to_owned())),
        }
    }
}
