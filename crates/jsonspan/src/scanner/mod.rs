//! Scanner: finds the boundaries of top-level JSON values in a text stream.
//!
//! The scanner never parses. It tracks just enough lexical state (string
//! quoting, backslash escapes, one depth counter per bracket kind) to notice
//! when a candidate value closes, then cuts that exact slice of the input into
//! the [`ReadyQueue`].
//!
//! Per character, first matching rule wins:
//!
//! 1. The character right after a `\` is literal.
//! 2. `\` arms the escape, inside or outside a string.
//! 3. `"` opens a candidate when none is open, or closes a bare string
//!    candidate while object depth is zero. Both only apply below array depth
//!    two. Every unescaped `"` toggles the quote state.
//! 4. Inside a string everything else is literal.
//! 5. `}` closes a `{` candidate when object depth returns to zero.
//! 6. `{` opens a candidate when none is open.
//! 7. `[` opens a candidate once array depth exceeds one.
//! 8. `]` closes a `[` candidate when array depth returns to one.
//!
//! Rules 7 and 8 make a single outermost array a transparent wrapper: for
//! `[{"a":1}, "b", [2]]` the spans are `{"a":1}`, `"b"` and `[2]`, and the
//! wrapper itself is never emitted. Objects have no such wrapper level.
//!
//! Depth counters survive flushes and are never clamped. Unbalanced closers
//! drive them negative and scanning carries on regardless.
//!
//! Multi-byte UTF-8 sequences never contain ASCII bytes, so the scanner walks
//! bytes; every delimiter it reacts to is ASCII and the boundaries it finds
//! are the same as for a per-character walk.

use alloc::string::String;

use log::{debug, trace, warn};

use crate::{
    buffer::ScanBuffer, error::UnterminatedValue, options::DEFAULT_COMPACT_THRESHOLD,
    options::EndOfStream, queue::ReadyQueue,
};

/// Incremental state machine over one logical input stream.
///
/// A `Scanner` is fed chunk after chunk with [`scan`](Scanner::scan) and
/// closed with [`finish`](Scanner::finish). Chunk boundaries may fall
/// anywhere, including inside strings and escape sequences.
///
/// ```rust
/// use jsonspan::{ReadyQueue, Scanner};
///
/// let mut scanner = Scanner::default();
/// let mut ready = ReadyQueue::new();
/// scanner.scan("{\"a\":", &mut ready);
/// assert!(ready.is_empty());
/// scanner.scan("1} \"b\"", &mut ready);
/// assert_eq!(ready.collect::<Vec<_>>(), ["{\"a\":1}", "\"b\""]);
/// ```
#[derive(Debug)]
pub struct Scanner {
    buffer: ScanBuffer,
    item_start: Option<usize>,
    quote_open: bool,
    escape_active: bool,
    object_depth: isize,
    array_depth: isize,
    underflow_reported: bool,
    compact_threshold: usize,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new(DEFAULT_COMPACT_THRESHOLD)
    }
}

impl Scanner {
    /// Creates a scanner that compacts its buffer once `compact_threshold`
    /// flushed bytes have piled up.
    #[must_use]
    pub fn new(compact_threshold: usize) -> Self {
        Self {
            buffer: ScanBuffer::new(),
            item_start: None,
            quote_open: false,
            escape_active: false,
            object_depth: 0,
            array_depth: 0,
            underflow_reported: false,
            compact_threshold,
        }
    }

    /// Appends `chunk` to the stream and pushes every span it completes onto
    /// `ready`, in input order.
    pub fn scan(&mut self, chunk: &str, ready: &mut ReadyQueue) {
        for pos in self.buffer.push(chunk) {
            let byte = self.buffer.byte_at(pos);
            self.step(byte, pos, ready);
        }

        let shift = self.buffer.compact(self.compact_threshold);
        if let Some(start) = self.item_start.as_mut() {
            *start -= shift;
        }
    }

    /// Ends the stream, applying `policy` to whatever was never flushed.
    ///
    /// # Errors
    ///
    /// Returns [`UnterminatedValue`] under [`EndOfStream::Error`] when a
    /// candidate is still open.
    pub fn finish(self, policy: EndOfStream) -> Result<Option<String>, UnterminatedValue> {
        if let Some(start) = self.item_start {
            let offset = self.buffer.absolute(start);
            let pending = self.buffer.tail_from(start).trim_end();
            return match policy {
                EndOfStream::Discard => {
                    debug!(
                        "discarding unterminated value at byte {offset} ({} bytes)",
                        pending.len()
                    );
                    Ok(None)
                }
                EndOfStream::Emit => {
                    debug!(
                        "emitting unterminated value at byte {offset} ({} bytes)",
                        pending.len()
                    );
                    Ok(Some(pending.into()))
                }
                EndOfStream::Error => Err(UnterminatedValue {
                    offset,
                    pending: pending.into(),
                }),
            };
        }

        // Closers outside a candidate are unmatched: a wrapper's `]` or drift.
        let leftover = self
            .buffer
            .live()
            .trim_matches(|c: char| matches!(c, ',' | ']' | '}') || c.is_ascii_whitespace());
        if leftover.is_empty() {
            return Ok(None);
        }
        if policy == EndOfStream::Emit {
            debug!("emitting {} bytes of untracked trailing text", leftover.len());
            Ok(Some(leftover.into()))
        } else {
            debug!("discarding {} bytes of untracked trailing text", leftover.len());
            Ok(None)
        }
    }

    /// Whether a candidate value is currently open.
    #[must_use]
    pub fn has_candidate(&self) -> bool {
        self.item_start.is_some()
    }

    /// Bytes buffered since the last flush.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.buffer.live_len()
    }

    /// Current `(object, array)` depth counters.
    #[must_use]
    pub fn depths(&self) -> (isize, isize) {
        (self.object_depth, self.array_depth)
    }

    fn step(&mut self, byte: u8, pos: usize, ready: &mut ReadyQueue) {
        if self.escape_active {
            self.escape_active = false;
            return;
        }

        match byte {
            b'\\' => self.escape_active = true,
            b'"' => {
                if self.array_depth < 2 {
                    match self.item_start {
                        None => self.item_start = Some(pos),
                        Some(start) if self.object_depth == 0 => self.flush(start, pos, ready),
                        Some(_) => {}
                    }
                }
                self.quote_open = !self.quote_open;
            }
            _ if self.quote_open => {}
            b'}' => {
                self.object_depth -= 1;
                self.report_underflow();
                if self.object_depth == 0 {
                    self.flush_if_opened_by(b'{', pos, ready);
                }
            }
            b'{' => {
                self.object_depth += 1;
                if self.item_start.is_none() {
                    self.item_start = Some(pos);
                }
            }
            b'[' => {
                self.array_depth += 1;
                if self.array_depth > 1 && self.item_start.is_none() {
                    self.item_start = Some(pos);
                }
            }
            b']' => {
                self.array_depth -= 1;
                self.report_underflow();
                if self.array_depth == 1 {
                    self.flush_if_opened_by(b'[', pos, ready);
                }
            }
            _ => {}
        }
    }

    fn flush_if_opened_by(&mut self, opener: u8, pos: usize, ready: &mut ReadyQueue) {
        if let Some(start) = self
            .item_start
            .filter(|&start| self.buffer.byte_at(start) == opener)
        {
            self.flush(start, pos, ready);
        }
    }

    /// Emits `buffer[start..=end]` and forgets everything up to `end`.
    fn flush(&mut self, start: usize, end: usize, ready: &mut ReadyQueue) {
        let offset = self.buffer.absolute(start);
        let span = self.buffer.take(start, end + 1);
        trace!("span of {} bytes at byte {offset}", span.len());
        self.item_start = None;
        ready.push(span);
    }

    fn report_underflow(&mut self) {
        if !self.underflow_reported && (self.object_depth < 0 || self.array_depth < 0) {
            self.underflow_reported = true;
            warn!(
                "unbalanced closing bracket (object depth {}, array depth {}); spans may be \
                 missed from here on",
                self.object_depth, self.array_depth
            );
        }
    }
}
