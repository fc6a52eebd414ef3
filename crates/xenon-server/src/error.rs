//! Error taxonomy of the protocol engine.
//!
//! Every variant here is scoped to one connection unless noted otherwise;
//! a failing connection never affects its siblings.

use thiserror::Error;

/// Protocol engine errors
#[derive(Error, Debug)]
pub enum ServerError {
    /// Corrupt or oversized length prefix on the byte stream.
    #[error("framing error: {0}")]
    Framing(String),

    /// Payload bytes did not parse as a protocol message.
    #[error("decode error: {0}")]
    Decode(#[from] prost::DecodeError),

    /// Socket-level failure: peer reset, broken pipe, bind or accept error.
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),

    /// The application handler signaled unrecoverable state corruption.
    #[error("fatal application error: {0}")]
    FatalApplication(String),

    /// Invalid listen address or configuration value.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The drain deadline elapsed before all connections resolved.
    #[error("shutdown deadline elapsed with {0} connections still draining")]
    DrainTimeout(usize),
}

/// Result type for protocol engine operations
pub type Result<T> = std::result::Result<T, ServerError>;
