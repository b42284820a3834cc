/// Default for [`SplitterOptions::compact_threshold`].
pub const DEFAULT_COMPACT_THRESHOLD: usize = 4096;

/// What happens to buffered text when the chunk source is exhausted.
///
/// Only text that has not been flushed is affected; every span completed
/// before exhaustion is delivered regardless of the policy. Whitespace-only
/// leftovers never produce a span or an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum EndOfStream {
    /// Silently drop an unterminated candidate and any trailing text.
    #[default]
    Discard,
    /// Deliver whatever is pending as one last, best-effort span.
    ///
    /// An open candidate is emitted from its opening delimiter with trailing
    /// whitespace removed. Without a candidate, trailing text that the scanner
    /// never tracks (such as a bare `123` or `true`) is emitted with
    /// surrounding whitespace, `,` separators and unmatched `]`/`}` closers
    /// removed.
    Emit,
    /// Report an open candidate as
    /// [`UnterminatedValue`](crate::UnterminatedValue). Trailing text outside
    /// a candidate is still dropped.
    Error,
}

/// Configuration for [`StreamSplitter`](crate::StreamSplitter) and
/// [`JsonSplitter`](crate::JsonSplitter).
///
/// # Examples
///
/// ```rust
/// use jsonspan::{EndOfStream, SplitterOptions, StreamSplitter};
///
/// let splitter = StreamSplitter::new(SplitterOptions {
///     end_of_stream: EndOfStream::Error,
///     ..Default::default()
/// });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SplitterOptions {
    /// Handling of pending text at end of input.
    ///
    /// # Default
    ///
    /// [`EndOfStream::Discard`]
    pub end_of_stream: EndOfStream,

    /// Number of already-flushed bytes the scanner may hold before it
    /// compacts its buffer.
    ///
    /// Compaction also waits until the flushed prefix is at least as long as
    /// the pending tail, so a long-running stream moves every byte a bounded
    /// number of times. Lower values trade more frequent copies for a smaller
    /// resident buffer.
    ///
    /// # Default
    ///
    /// [`DEFAULT_COMPACT_THRESHOLD`] (4096)
    pub compact_threshold: usize,
}

impl Default for SplitterOptions {
    fn default() -> Self {
        Self {
            end_of_stream: EndOfStream::default(),
            compact_threshold: DEFAULT_COMPACT_THRESHOLD,
        }
    }
}
