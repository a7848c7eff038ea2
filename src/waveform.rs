// src/waveform.rs

use std::f64::consts::TAU;
use std::ops::Index;

/// Number of samples in one period of the generated waveform.
pub const TABLE_LEN: usize = 1000;

/// One precomputed period of a sine wave.
///
/// This struct:
/// - is built once at startup
/// - is immutable afterwards
/// - is owned by the emitter for the lifetime of the process
///
/// The phase is advanced *before* each sample is taken, so the first
/// entry is `sin(2π / N)` rather than `sin(0)`. The last entry lands on
/// `sin(2π)`, which closes the period.
#[derive(Debug, Clone)]
pub struct SampleTable {
    values: Box<[f32]>,
}

impl SampleTable {
    /// Build the table for `TABLE_LEN` samples.
    pub fn build() -> Self {
        Self::with_len(TABLE_LEN)
    }

    /// Build a table with an arbitrary number of samples per period.
    ///
    /// `len` must be non-zero.
    pub fn with_len(len: usize) -> Self {
        assert!(len > 0, "sample table must not be empty");

        let step = TAU / len as f64;
        let mut phase = 0.0_f64;

        let values = (0..len)
            .map(|_| {
                phase += step;
                phase.sin() as f32
            })
            .collect();

        Self { values }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<f32> {
        self.values.get(index).copied()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }
}

impl Index<usize> for SampleTable {
    type Output = f32;

    #[inline]
    fn index(&self, index: usize) -> &f32 {
        &self.values[index]
    }
}
