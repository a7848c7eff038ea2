// src/cursor.rs

/// Wrapping read position into a sample table.
///
/// This struct:
/// - is copyable
/// - is mutated only by the emitter
/// - always stays in `0..len`
///
/// The total number of advances is tracked alongside the index so that
/// callers can tell how many full periods have been played.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Cursor {
    index: usize,
    len: usize,
    ticks: u64,
}

impl Cursor {
    /// Create a cursor over a table of `len` entries, starting at 0.
    pub fn new(len: usize) -> Self {
        assert!(len > 0, "cursor needs a non-empty table");
        Self {
            index: 0,
            len,
            ticks: 0,
        }
    }

    //
    // ===============================
    // MARK: Accessors
    // ===============================
    //

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of times the cursor has been advanced.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Number of completed passes over the table.
    #[inline]
    pub fn periods(&self) -> u64 {
        self.ticks / self.len as u64
    }

    //
    // ===============================
    // MARK: Advancement
    // ===============================
    //

    /// Step to the next entry, wrapping to 0 after the last one.
    #[inline]
    pub fn advance(&mut self) {
        self.index += 1;
        if self.index == self.len {
            self.index = 0;
        }
        self.ticks += 1;
    }
}
