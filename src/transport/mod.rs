//! Datagram transport used by the step controller.
//!
//! The controller only ever asks three things of a transport: how much is
//! queued, give me one datagram, and send one datagram. `UdpTransport` is the
//! real socket; `OfflineTransport` stands in when the bridge runs without a
//! network.

pub mod udp;

use std::io;
use std::net::SocketAddr;

use crate::error::TransportError;

pub use udp::UdpTransport;

/// Connectionless, non-blocking datagram channel.
pub trait Transport {
    /// Size of the next queued datagram, or 0 when nothing is waiting.
    /// Must return immediately.
    fn pending_bytes(&mut self) -> Result<usize, TransportError>;

    /// Read one queued datagram, at most `max_len` bytes of it, along with the
    /// sender's address. Only called after `pending_bytes` reported data.
    fn receive(&mut self, max_len: usize) -> Result<(Vec<u8>, SocketAddr), TransportError>;

    /// Send one datagram to `peer`.
    fn send(&mut self, bytes: &[u8], peer: SocketAddr) -> Result<(), TransportError>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn pending_bytes(&mut self) -> Result<usize, TransportError> {
        (**self).pending_bytes()
    }

    fn receive(&mut self, max_len: usize) -> Result<(Vec<u8>, SocketAddr), TransportError> {
        (**self).receive(max_len)
    }

    fn send(&mut self, bytes: &[u8], peer: SocketAddr) -> Result<(), TransportError> {
        (**self).send(bytes, peer)
    }
}

/// Transport with no socket behind it: never has data, swallows sends.
#[derive(Debug, Default)]
pub struct OfflineTransport;

impl Transport for OfflineTransport {
    fn pending_bytes(&mut self) -> Result<usize, TransportError> {
        Ok(0)
    }

    fn receive(&mut self, _max_len: usize) -> Result<(Vec<u8>, SocketAddr), TransportError> {
        Err(TransportError::Receive(io::Error::new(
            io::ErrorKind::WouldBlock,
            "offline transport has no data",
        )))
    }

    fn send(&mut self, _bytes: &[u8], _peer: SocketAddr) -> Result<(), TransportError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offline_transport_is_always_empty() {
        let mut transport = OfflineTransport;
        assert_eq!(transport.pending_bytes().unwrap(), 0);
        assert!(transport.receive(64).is_err());
        assert!(transport.send(b"x", "127.0.0.1:9".parse().unwrap()).is_ok());
    }
}
