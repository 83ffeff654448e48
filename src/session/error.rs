use miette::Diagnostic;
use thiserror::Error;

/// Failures while building, connecting or driving a session transport.
#[derive(Error, Diagnostic, Debug)]
pub enum TransportError {
    #[error("Failed to create session handler: {0}")]
    #[diagnostic(code(freelo_mcp::session::setup))]
    Setup(String),

    #[error("Session transport is already connected")]
    #[diagnostic(code(freelo_mcp::session::already_connected))]
    AlreadyConnected,

    #[error("Session transport is not connected")]
    #[diagnostic(code(freelo_mcp::session::not_connected))]
    NotConnected,

    #[error("Session transport is closed")]
    #[diagnostic(code(freelo_mcp::session::closed))]
    Closed,

    #[error("I/O error on session channel: {0}")]
    #[diagnostic(code(freelo_mcp::session::io))]
    Io(#[from] std::io::Error),

    #[error("Failed to encode message: {0}")]
    #[diagnostic(code(freelo_mcp::session::encode))]
    Encode(#[from] serde_json::Error),
}
