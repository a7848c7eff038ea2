// src/pacing.rs

use std::time::Duration;

use crate::error::{Error, Result};

/// How the sleep between ticks is derived from the requested frequency.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum PacingMode {
    /// One tick every `1 / frequency` seconds.
    #[default]
    Corrected,

    /// Legacy arithmetic: `1 / frequency` truncated to an integer, read
    /// as microseconds. Collapses every frequency above 1 Hz to no sleep.
    Literal,
}

/// Compute the sleep between two ticks.
///
/// Fails for frequencies that are not positive and finite, or whose
/// interval cannot be represented as a `Duration`.
pub fn pacing_interval(frequency: f64, mode: PacingMode) -> Result<Duration> {
    if !frequency.is_finite() || frequency <= 0.0 {
        return Err(Error::InvalidFrequency(frequency));
    }

    match mode {
        PacingMode::Corrected => Duration::try_from_secs_f64(frequency.recip())
            .map_err(|_| Error::InvalidFrequency(frequency)),

        // `as u64` truncates toward zero and saturates
        PacingMode::Literal => Ok(Duration::from_micros(frequency.recip() as u64)),
    }
}

/// Effective emission rate for a given interval, `None` when unpaced.
pub fn effective_rate(interval: Duration) -> Option<f64> {
    if interval.is_zero() {
        None
    } else {
        Some(interval.as_secs_f64().recip())
    }
}
