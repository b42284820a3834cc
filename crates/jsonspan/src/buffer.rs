use alloc::string::String;
use core::ops::Range;

/// Append-only text window backing the scanner.
///
/// Flushed spans are cut from the front by advancing `start` instead of
/// shifting the remaining text. The retired prefix is reclaimed by
/// [`ScanBuffer::compact`] once it is at least as large as the live tail, so
/// the total amount of copying stays linear in the length of the stream.
#[derive(Debug, Default)]
pub(crate) struct ScanBuffer {
    data: String,
    /// First live byte of `data`.
    start: usize,
    /// Absolute stream offset of `data[0]`.
    base: usize,
}

impl ScanBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends `text` and returns the byte range it now occupies.
    pub(crate) fn push(&mut self, text: &str) -> Range<usize> {
        let begin = self.data.len();
        self.data.reserve(text.len());
        self.data.push_str(text);
        begin..self.data.len()
    }

    #[inline]
    pub(crate) fn byte_at(&self, index: usize) -> u8 {
        self.data.as_bytes()[index]
    }

    /// Copies `data[from..to]` out and retires everything before `to`.
    ///
    /// Both bounds must sit next to ASCII delimiters, which are always char
    /// boundaries.
    pub(crate) fn take(&mut self, from: usize, to: usize) -> String {
        debug_assert!(self.start <= from && from < to && to <= self.data.len());
        let span = String::from(&self.data[from..to]);
        self.start = to;
        span
    }

    /// Text that has not been retired by a flush.
    pub(crate) fn live(&self) -> &str {
        &self.data[self.start..]
    }

    pub(crate) fn tail_from(&self, from: usize) -> &str {
        &self.data[from..]
    }

    /// Stream-wide byte offset of `index`.
    pub(crate) fn absolute(&self, index: usize) -> usize {
        self.base + index
    }

    pub(crate) fn live_len(&self) -> usize {
        self.data.len() - self.start
    }

    /// Drops the retired prefix once it reaches `threshold` bytes and is no
    /// smaller than the live tail.
    ///
    /// Returns how far the remaining bytes moved so callers can re-base any
    /// index they hold into the window.
    pub(crate) fn compact(&mut self, threshold: usize) -> usize {
        let shift = self.start;
        if shift == 0 || shift < threshold || shift < self.live_len() {
            return 0;
        }
        self.data.drain(..shift);
        self.base += shift;
        self.start = 0;
        shift
    }
}
