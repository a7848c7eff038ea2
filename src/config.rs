// src/config.rs

use std::time::Duration;

use clap::{Parser, Subcommand};
use log::LevelFilter;

use crate::error::Result;
use crate::pacing::{PacingMode, pacing_interval};

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_FREQUENCY: f64 = 500.0;

#[derive(Parser, Debug)]
#[command(
    name = "oscgen",
    version,
    about = "Stream a synthetic six-channel EEG sine wave as OSC over UDP to 127.0.0.1"
)]
pub struct Cli {
    /// The port to which the OSC stream is sent.
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// The rate at which packets are sent, in Hz.
    #[arg(long, default_value_t = DEFAULT_FREQUENCY)]
    pub frequency: f64,

    /// How the sleep between packets is derived from the frequency.
    #[arg(long, value_enum, default_value_t = PacingMode::Corrected)]
    pub pacing: PacingMode,

    /// Send N packets then exit (0 = run until interrupted).
    #[arg(long, default_value_t = 0)]
    pub count: u64,

    /// Do not print the progress line.
    #[arg(long)]
    pub quiet: bool,

    /// Log level; RUST_LOG takes precedence when set.
    #[arg(long, default_value_t = LevelFilter::Warn, global = true)]
    pub log_level: LevelFilter,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print /muse/eeg packets arriving on a local UDP port.
    Listen {
        /// Local port to bind on 127.0.0.1.
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,

        /// Exit after N samples (0 = run until interrupted).
        #[arg(long, default_value_t = 0)]
        count: u64,
    },
}

/// Validated settings for a generator run.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub port: u16,
    pub frequency: f64,
    pub pacing: PacingMode,
    pub interval: Duration,
    pub limit: Option<u64>,
    pub progress: bool,
}

impl GeneratorConfig {
    pub fn new(port: u16, frequency: f64, pacing: PacingMode) -> Result<Self> {
        Ok(Self {
            port,
            frequency,
            pacing,
            interval: pacing_interval(frequency, pacing)?,
            limit: None,
            progress: true,
        })
    }

    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut config = Self::new(cli.port, cli.frequency, cli.pacing)?;
        config.limit = limit(cli.count);
        config.progress = !cli.quiet;
        Ok(config)
    }
}

/// Validated settings for the listen mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenConfig {
    pub port: u16,
    pub limit: Option<u64>,
}

/// Map the CLI's "0 means forever" convention onto an optional limit.
#[inline]
fn limit(count: u64) -> Option<u64> {
    (count > 0).then_some(count)
}

impl Command {
    pub fn listen_config(&self) -> ListenConfig {
        match self {
            Command::Listen { port, count } => ListenConfig {
                port: *port,
                limit: limit(*count),
            },
        }
    }
}
