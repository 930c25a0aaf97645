//! Error kinds surfaced by the bridge.
//!
//! Every failure is fatal for the step (or for `start`) in which it occurs.
//! Nothing is retried and no error state carries into the next step.

use std::io;
use std::net::SocketAddr;
use thiserror::Error;

/// Inbound frame could not be decoded.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    #[error("actuator frame truncated: got {len} bytes, need {}", crate::protocol::ACTUATOR_FRAME_LEN)]
    Truncated { len: usize },
}

/// Socket-level failure.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to bind UDP socket on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
    #[error("failed to receive datagram: {0}")]
    Receive(#[source] io::Error),
    #[error("failed to send datagram to {peer}: {source}")]
    Send {
        peer: SocketAddr,
        #[source]
        source: io::Error,
    },
}

/// Failure reported to the host from `start`, `step` or `terminate`.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("failed to encode sensor packet: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("input port {index} has width {actual}, expected {expected}")]
    InputPort { index: usize, expected: usize, actual: usize },
    #[error("expected {expected} input ports, got {actual}")]
    InputPortCount { expected: usize, actual: usize },
    #[error("output port has width {actual}, expected {expected}")]
    OutputPort { expected: usize, actual: usize },
    #[error("bridge stepped before start")]
    NotStarted,
}
