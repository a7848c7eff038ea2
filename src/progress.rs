// src/progress.rs

use std::io::Write;
use std::time::Duration;

/// Single rewritten console line showing how long the stream has run.
///
/// Cosmetic only: write errors are ignored and the line is redrawn only
/// when the displayed tenth of a second changes.
pub struct Progress<W: Write> {
    out: W,
    enabled: bool,
    last_tenths: Option<u64>,
}

impl<W: Write> Progress<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            enabled: true,
            last_tenths: None,
        }
    }

    /// A reporter that never writes.
    pub fn disabled(out: W) -> Self {
        Self {
            out,
            enabled: false,
            last_tenths: None,
        }
    }

    /// Report elapsed streaming time.
    pub fn report(&mut self, elapsed: Duration) {
        if !self.enabled {
            return;
        }

        let tenths = (elapsed.as_millis() / 100) as u64;
        if self.last_tenths == Some(tenths) {
            return;
        }
        self.last_tenths = Some(tenths);

        let _ = write!(self.out, "\rStreaming for {}.{}s", tenths / 10, tenths % 10);
        let _ = self.out.flush();
    }

    /// Terminate the progress line so later output starts on a fresh line.
    pub fn finish(&mut self) {
        if self.enabled && self.last_tenths.is_some() {
            let _ = writeln!(self.out);
            let _ = self.out.flush();
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
