/// Separator between the lines packed into one inbound server message.
pub const PAYLOAD_DELIMITER: &str = ";;";

/// Segment appended to the page path to reach the socket endpoint.
///
/// Appended by plain concatenation: `/console/` becomes `/console/ws`,
/// `/app` becomes `/appws`.
pub const WS_PATH_SUFFIX: &str = "ws";

/// Page protocol that selects the secure socket scheme.
pub const SECURE_PAGE_PROTOCOL: &str = "https:";

/// Socket scheme used when the page was served over TLS.
pub const WS_SCHEME_SECURE: &str = "wss";

/// Socket scheme used for plain HTTP pages.
pub const WS_SCHEME_PLAIN: &str = "ws";

/// Command text that switches the server-side TCP relay on.
pub const CMD_SERVER_TCP_ON: &str = "serverTcpOn";

/// Command text that switches the server-side TCP relay off.
pub const CMD_SERVER_TCP_OFF: &str = "serverTcpOff";

/// Prefix used when outbound commands are echoed into the log.
pub const OUTBOUND_ECHO_PREFIX: &str = "SEND: ";

/// Maximum inbound message size in bytes (16 MB).
pub const WS_MAX_MESSAGE_SIZE: usize = 16 * 1024 * 1024;
