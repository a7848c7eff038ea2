// src/emitter.rs

use std::io::Write;
use std::time::{Duration, Instant};

use crate::config::GeneratorConfig;
use crate::cursor::Cursor;
use crate::error::Result;
use crate::message::{EEG_PACKET_LEN, EegPacket};
use crate::progress::Progress;
use crate::shutdown::Shutdown;
use crate::sink::{PacketSink, UdpSink};
use crate::waveform::SampleTable;

/// Counters for one emitter run.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct EmitterStats {
    /// Ticks executed (one packet built per tick)
    pub ticks: u64,

    /// Packets handed to the transport without error
    pub sent: u64,

    /// Packets the transport rejected
    pub failed: u64,
}

/// Walks the sample table and streams one packet per tick.
///
/// This struct:
/// - runs on a single thread
/// - owns the table, the cursor and the transport
/// - never retries a send; failures only bump a counter
///
/// The only blocking call is the wait between ticks, which a shutdown
/// request interrupts.
pub struct Emitter<S: PacketSink> {
    table: SampleTable,
    cursor: Cursor,
    sink: S,

    /// Sleep between ticks
    interval: Duration,

    /// Pre-allocated encode buffer, reused every tick
    scratch: Vec<u8>,

    stats: EmitterStats,
}

impl<S: PacketSink> Emitter<S> {
    pub fn new(table: SampleTable, sink: S, interval: Duration) -> Self {
        let cursor = Cursor::new(table.len());
        Self {
            table,
            cursor,
            sink,
            interval,
            scratch: Vec::with_capacity(EEG_PACKET_LEN),
            stats: EmitterStats::default(),
        }
    }

    //
    // ===============================
    // MARK: Tick
    // ===============================
    //

    /// Build, encode and send the packet for the current cursor position,
    /// then advance the cursor.
    ///
    /// Send errors are swallowed.
    pub fn tick(&mut self) -> EegPacket {
        let packet = EegPacket::from_base(self.table[self.cursor.index()]);
        packet.encode_into(&mut self.scratch);

        match self.sink.send(&self.scratch) {
            Ok(()) => self.stats.sent += 1,
            Err(_) => self.stats.failed += 1,
        }
        self.stats.ticks += 1;

        self.cursor.advance();
        packet
    }

    //
    // ===============================
    // MARK: Run loop
    // ===============================
    //

    /// Tick until `shutdown` is raised or `limit` ticks have run.
    ///
    /// `None` runs until shutdown. Returns the counters for this run only.
    pub fn run<W: Write>(
        &mut self,
        shutdown: &Shutdown,
        limit: Option<u64>,
        progress: &mut Progress<W>,
    ) -> EmitterStats {
        let start = Instant::now();
        let before = self.stats;
        let mut ticks = 0u64;

        log::info!(
            "Emitter started: interval {:?}, limit {:?}, cursor {}",
            self.interval,
            limit,
            self.cursor.index()
        );

        loop {
            if shutdown.is_requested() {
                log::info!("Shutdown requested, stopping emitter");
                break;
            }
            if limit.is_some_and(|n| ticks >= n) {
                break;
            }

            progress.report(start.elapsed());

            self.tick();
            ticks += 1;

            if !self.interval.is_zero() && shutdown.wait_timeout(self.interval) {
                log::info!("Shutdown requested, stopping emitter");
                break;
            }
        }

        progress.finish();

        let run = EmitterStats {
            ticks: self.stats.ticks - before.ticks,
            sent: self.stats.sent - before.sent,
            failed: self.stats.failed - before.failed,
        };

        log::info!(
            "Emitter stopped after {} ticks in {:.1}s ({} sent, {} failed)",
            run.ticks,
            start.elapsed().as_secs_f64(),
            run.sent,
            run.failed
        );

        run
    }

    //
    // ===============================
    // MARK: Accessors
    // ===============================
    //

    #[inline]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Lifetime totals across all runs.
    #[inline]
    pub fn stats(&self) -> EmitterStats {
        self.stats
    }

    pub fn table(&self) -> &SampleTable {
        &self.table
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

/// Build a UDP emitter for a validated configuration.
pub fn create_emitter(config: &GeneratorConfig) -> Result<Emitter<UdpSink>> {
    let sink = UdpSink::localhost(config.port)?;
    Ok(Emitter::new(SampleTable::build(), sink, config.interval))
}
