//! UDP socket transport.
//!
//! The socket is created through `socket2` so that `SO_REUSEADDR` can be set
//! before binding; a bridge that is stopped and restarted must be able to
//! rebind the same port straight away. After binding it is handed over to a
//! plain `std::net::UdpSocket` in non-blocking mode.
//!
//! Polling peeks at the head datagram and relies on Linux/BSD semantics:
//! `peek_from` into a short buffer silently truncates, and ICMP
//! port-unreachable replies are not reported on unconnected sockets. Windows
//! differs on both counts (`WSAEMSGSIZE` for an oversize peek,
//! `WSAECONNRESET` after an unreachable peer). Either surfaces as
//! `TransportError::Receive` and fails the step, so on Windows a lost
//! autopilot ends the run instead of leaving the bridge polling.

use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::{SocketAddr, UdpSocket};
use std::time::Duration;

use super::Transport;
use crate::error::TransportError;

/// Non-blocking UDP endpoint bound to a fixed local address.
pub struct UdpTransport {
    socket: UdpSocket,
    /// Peek/receive buffer. One byte longer than the datagram cap so that
    /// oversize datagrams can be told apart from ones that exactly fit.
    scratch: Vec<u8>,
}

impl UdpTransport {
    /// Bind a datagram socket on `addr` with address reuse enabled.
    ///
    /// # Arguments
    /// * `addr` - Local address and port to bind
    /// * `receive_timeout` - Applied as `SO_RCVTIMEO`. The socket runs
    ///   non-blocking, so this only matters to code that switches it back to
    ///   blocking reads
    /// * `max_datagram_len` - Largest datagram the step reads; sizes the peek buffer
    ///
    /// # Returns
    /// * `Ok(UdpTransport)` bound and non-blocking
    /// * `Err(TransportError::Bind)` if any socket option or the bind fails
    pub fn bind(addr: SocketAddr, receive_timeout: Duration, max_datagram_len: usize) -> Result<Self, TransportError> {
        let bind_err = |source: io::Error| TransportError::Bind { addr, source };

        let socket = Socket::new(Domain::for_address(addr), Type::DGRAM, Some(Protocol::UDP)).map_err(bind_err)?;
        socket.set_reuse_address(true).map_err(bind_err)?;
        socket.set_read_timeout(Some(receive_timeout)).map_err(bind_err)?;
        socket.bind(&addr.into()).map_err(bind_err)?;
        socket.set_nonblocking(true).map_err(bind_err)?;

        let socket: UdpSocket = socket.into();
        if let Ok(local) = socket.local_addr() {
            log::info!("UDP transport bound on {}", local);
        }

        Ok(Self {
            socket,
            scratch: vec![0u8; max_datagram_len + 1],
        })
    }

    /// Address the socket is actually bound to (resolves port 0).
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }
}

impl Transport for UdpTransport {
    fn pending_bytes(&mut self) -> Result<usize, TransportError> {
        loop {
            match self.socket.peek_from(&mut self.scratch) {
                Ok((0, from)) => {
                    // An empty datagram would read as "nothing pending" forever
                    // while still blocking the queue, so drop it here.
                    self.socket.recv_from(&mut self.scratch).map_err(TransportError::Receive)?;
                    log::debug!("Discarded empty datagram from {}", from);
                }
                Ok((len, _)) => return Ok(len),
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => return Ok(0),
                Err(e) => return Err(TransportError::Receive(e)),
            }
        }
    }

    fn receive(&mut self, max_len: usize) -> Result<(Vec<u8>, SocketAddr), TransportError> {
        let cap = max_len.min(self.scratch.len());
        let (len, peer) = self.socket.recv_from(&mut self.scratch[..cap]).map_err(TransportError::Receive)?;
        Ok((self.scratch[..len].to_vec(), peer))
    }

    fn send(&mut self, bytes: &[u8], peer: SocketAddr) -> Result<(), TransportError> {
        self.socket
            .send_to(bytes, peer)
            .map(|_| ())
            .map_err(|source| TransportError::Send { peer, source })
    }
}

impl Drop for UdpTransport {
    fn drop(&mut self) {
        if let Ok(local) = self.socket.local_addr() {
            log::info!("UDP transport on {} closed", local);
        }
    }
}
