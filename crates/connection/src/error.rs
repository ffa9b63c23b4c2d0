//! Error types for the connection crate.

use tokio_tungstenite::tungstenite;

/// Errors produced by the console transport.
///
/// Guard violations (connect while connected, send while disconnected)
/// are not errors; they are reported through the outcome enums.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("invalid endpoint {endpoint}: {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: tungstenite::Error,
    },

    #[error("WebSocket error: {0}")]
    Ws(#[from] tungstenite::Error),

    #[error("outbound queue full")]
    QueueFull,

    #[error("connection closed")]
    Closed,
}
