// src/error.rs

use thiserror::Error;

/// Result type for generator operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that stop the generator or receiver from starting.
///
/// Per-tick send failures never surface here; the emitter only counts them.
#[derive(Error, Debug)]
pub enum Error {
    /// Frequency is not a positive finite number, or its interval overflows.
    #[error("invalid frequency {0} Hz: must be a positive, finite rate")]
    InvalidFrequency(f64),

    /// Socket setup or receive failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Installing the Ctrl-C handler failed.
    #[error("signal handler error: {0}")]
    Signal(#[from] ctrlc::Error),
}
