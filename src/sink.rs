// src/sink.rs

use std::io;
use std::net::{Ipv4Addr, SocketAddr, UdpSocket};

/// Destination host for the generated stream.
pub const LOCALHOST: Ipv4Addr = Ipv4Addr::LOCALHOST;

/// Outbound datagram transport.
///
/// Implementations must not retry or block waiting for acknowledgement.
/// The emitter treats every error as a dropped packet.
pub trait PacketSink {
    fn send(&mut self, datagram: &[u8]) -> io::Result<()>;
}

/// Fire-and-forget UDP sender bound to an ephemeral local port.
#[derive(Debug)]
pub struct UdpSink {
    socket: UdpSocket,
    dest: SocketAddr,
}

impl UdpSink {
    /// Bind an ephemeral socket that sends to `dest`.
    pub fn new(dest: SocketAddr) -> io::Result<Self> {
        let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?;
        log::debug!("Bound UDP sink {} -> {}", socket.local_addr()?, dest);
        Ok(Self { socket, dest })
    }

    /// Sender for `127.0.0.1:<port>`.
    pub fn localhost(port: u16) -> io::Result<Self> {
        Self::new(SocketAddr::from((LOCALHOST, port)))
    }

    pub fn dest(&self) -> SocketAddr {
        self.dest
    }
}

impl PacketSink for UdpSink {
    #[inline]
    fn send(&mut self, datagram: &[u8]) -> io::Result<()> {
        // Unconnected socket: ICMP port-unreachable is not reported back to us
        self.socket.send_to(datagram, self.dest).map(|_| ())
    }
}
