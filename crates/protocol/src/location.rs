use serde::{Deserialize, Serialize};

use crate::constants::{SECURE_PAGE_PROTOCOL, WS_PATH_SUFFIX, WS_SCHEME_PLAIN, WS_SCHEME_SECURE};
use crate::error::ProtocolError;

/// Location of the page hosting the console.
///
/// Mirrors the browser `Location` fields the endpoint is derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLocation {
    /// Scheme including the trailing colon, e.g. `https:`.
    pub protocol: String,
    /// Hostname plus `:port` when the port is not the scheme default.
    pub host: String,
    /// Path of the page, e.g. `/console/`.
    pub pathname: String,
}

impl PageLocation {
    pub fn new(
        protocol: impl Into<String>,
        host: impl Into<String>,
        pathname: impl Into<String>,
    ) -> Self {
        Self {
            protocol: protocol.into(),
            host: host.into(),
            pathname: pathname.into(),
        }
    }

    /// Builds a location from a full page URL.
    ///
    /// Default ports are omitted from `host`, an empty path becomes `/`,
    /// and query string and fragment are discarded.
    pub fn parse(page_url: &str) -> Result<Self, ProtocolError> {
        let url = url::Url::parse(page_url)?;
        let hostname = url
            .host_str()
            .ok_or_else(|| ProtocolError::MissingHost(page_url.to_owned()))?;
        let host = match url.port() {
            Some(port) => format!("{hostname}:{port}"),
            None => hostname.to_owned(),
        };
        let pathname = match url.path() {
            "" => "/".to_owned(),
            path => path.to_owned(),
        };

        Ok(Self {
            protocol: format!("{}:", url.scheme()),
            host,
            pathname,
        })
    }

    /// Whether the page was served over TLS.
    pub fn is_secure(&self) -> bool {
        self.protocol == SECURE_PAGE_PROTOCOL
    }

    /// Derives the WebSocket endpoint for this page.
    ///
    /// The suffix is concatenated onto the page path without inserting a
    /// separator.
    pub fn websocket_endpoint(&self) -> String {
        let scheme = if self.is_secure() {
            WS_SCHEME_SECURE
        } else {
            WS_SCHEME_PLAIN
        };
        format!("{scheme}://{}{}{WS_PATH_SUFFIX}", self.host, self.pathname)
    }
}
