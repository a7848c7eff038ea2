// src/receiver.rs

use std::io::{self, Write};
use std::net::{SocketAddr, UdpSocket};
use std::time::{Duration, Instant};

use crate::error::Result;
use crate::message::{CHANNEL_LABELS, EegPacket};
use crate::osc::OscMessage;
use crate::shutdown::Shutdown;
use crate::sink::LOCALHOST;

/// Largest datagram accepted; EEG packets are 44 bytes.
const RECV_BUFFER_LEN: usize = 1536;

/// How often a blocked receive wakes up to check for shutdown.
const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// A decoded EEG sample with its arrival time.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EegSample {
    pub packet: EegPacket,

    /// Time since the receiver was bound
    pub timestamp: Duration,
}

/// Counters for one receiver run.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct ReceiverStats {
    pub accepted: u64,

    /// Valid OSC, but not a six-float `/muse/eeg` message
    pub ignored: u64,

    /// Not decodable as OSC
    pub malformed: u64,
}

/// Listens on a local UDP port for `/muse/eeg` packets.
pub struct Receiver {
    socket: UdpSocket,
    buf: Box<[u8]>,
    epoch: Instant,
    stats: ReceiverStats,
}

impl Receiver {
    /// Bind to `127.0.0.1:<port>`. Port 0 picks an ephemeral port.
    pub fn bind(port: u16) -> Result<Self> {
        let socket = UdpSocket::bind((LOCALHOST, port))?;
        socket.set_read_timeout(Some(POLL_INTERVAL))?;
        log::info!("Receiver listening on {}", socket.local_addr()?);

        Ok(Self {
            socket,
            buf: vec![0u8; RECV_BUFFER_LEN].into_boxed_slice(),
            epoch: Instant::now(),
            stats: ReceiverStats::default(),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    pub fn stats(&self) -> ReceiverStats {
        self.stats
    }

    /// Wait for the next datagram.
    ///
    /// Returns `Ok(None)` when the poll interval elapses, or when the
    /// datagram is not an EEG packet. Such datagrams are counted and dropped.
    pub fn recv_sample(&mut self) -> Result<Option<EegSample>> {
        let (len, from) = match self.socket.recv_from(&mut self.buf) {
            Ok(received) => received,
            Err(e) if is_timeout(&e) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let timestamp = self.epoch.elapsed();

        let msg = match OscMessage::decode(&self.buf[..len]) {
            Ok(msg) => msg,
            Err(e) => {
                log::debug!("Dropping malformed datagram from {}: {}", from, e);
                self.stats.malformed += 1;
                return Ok(None);
            }
        };

        match EegPacket::from_osc(&msg) {
            Some(packet) => {
                self.stats.accepted += 1;
                Ok(Some(EegSample { packet, timestamp }))
            }
            None => {
                log::debug!(
                    "Ignoring {} {} from {}",
                    msg.address,
                    msg.type_tags(),
                    from
                );
                self.stats.ignored += 1;
                Ok(None)
            }
        }
    }

    /// Print every accepted sample as a line until shutdown or `limit`
    /// samples have been written.
    pub fn run<W: Write>(
        &mut self,
        shutdown: &Shutdown,
        limit: Option<u64>,
        out: &mut W,
    ) -> Result<ReceiverStats> {
        writeln!(out, "{}", header())?;

        let mut written = 0u64;
        while !shutdown.is_requested() && !limit.is_some_and(|n| written >= n) {
            if let Some(sample) = self.recv_sample()? {
                writeln!(out, "{}", format_sample(&sample))?;
                written += 1;
            }
        }
        out.flush()?;

        log::info!(
            "Receiver stopped: {} accepted, {} ignored, {} malformed",
            self.stats.accepted,
            self.stats.ignored,
            self.stats.malformed
        );
        Ok(self.stats)
    }
}

#[inline]
fn is_timeout(e: &io::Error) -> bool {
    matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut)
}

fn header() -> String {
    std::iter::once("timestamp")
        .chain(CHANNEL_LABELS)
        .collect::<Vec<_>>()
        .join(",")
}

fn format_sample(sample: &EegSample) -> String {
    let mut line = format!("{:.6}", sample.timestamp.as_secs_f64());
    for value in sample.packet.channels {
        line.push_str(&format!(",{value:.6}"));
    }
    line
}
