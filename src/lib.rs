// src/lib.rs
//
// Library entry point: waveform generation, OSC encoding and the
// UDP emitter loop used by the `oscgen` binary.

pub mod config;
pub mod cursor;
pub mod emitter;
pub mod error;
pub mod message;
pub mod osc;
pub mod pacing;
pub mod progress;
pub mod receiver;
pub mod shutdown;
pub mod sink;
pub mod waveform;

#[cfg(test)]
mod test;

// Re-export key types for Rust consumers
pub use config::{Cli, Command, GeneratorConfig, ListenConfig};
pub use emitter::{Emitter, EmitterStats, create_emitter};
pub use error::{Error, Result};
pub use message::{EEG_ADDRESS, EegPacket};
pub use pacing::{PacingMode, pacing_interval};
pub use receiver::Receiver;
pub use shutdown::Shutdown;
pub use sink::{PacketSink, UdpSink};
pub use waveform::{SampleTable, TABLE_LEN};
