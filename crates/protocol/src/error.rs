//! Error types for the protocol crate.

/// Errors produced while interpreting console inputs.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("invalid page URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("page URL has no host: {0}")]
    MissingHost(String),

    #[error("unknown relay command: {0}")]
    UnknownCommand(String),
}
