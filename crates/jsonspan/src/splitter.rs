use alloc::string::String;

use crate::{
    error::UnterminatedValue,
    options::{EndOfStream, SplitterOptions},
    queue::ReadyQueue,
    scanner::Scanner,
};

/// Push-style splitter: feed chunks, collect completed spans.
///
/// Owns a [`Scanner`] and its [`ReadyQueue`]. Use this when the caller
/// controls the chunk loop; [`JsonSplitter`](crate::JsonSplitter) wraps the
/// same machinery behind a pull-based iterator.
///
/// # Examples
///
/// ```rust
/// use jsonspan::{SplitterOptions, StreamSplitter};
///
/// let mut splitter = StreamSplitter::new(SplitterOptions::default());
/// let mut spans = Vec::new();
/// for chunk in ["{\"a\":", "1}\n{\"b\"", ":2}\n"] {
///     spans.extend(splitter.feed(chunk));
/// }
/// spans.extend(splitter.finish().map(Result::unwrap));
/// assert_eq!(spans, ["{\"a\":1}", "{\"b\":2}"]);
/// ```
#[derive(Debug)]
pub struct StreamSplitter {
    scanner: Scanner,
    ready: ReadyQueue,
    end_of_stream: EndOfStream,
}

impl Default for StreamSplitter {
    fn default() -> Self {
        Self::new(SplitterOptions::default())
    }
}

impl StreamSplitter {
    /// Creates a splitter for one logical input stream.
    #[must_use]
    pub fn new(options: SplitterOptions) -> Self {
        Self {
            scanner: Scanner::new(options.compact_threshold),
            ready: ReadyQueue::new(),
            end_of_stream: options.end_of_stream,
        }
    }

    /// Scans `chunk` and returns an iterator over every span completed so
    /// far.
    ///
    /// Spans left in the iterator when it is dropped stay queued and are
    /// returned by the next `feed` or by [`finish`](Self::finish).
    pub fn feed(&mut self, chunk: &str) -> Spans<'_> {
        self.push(chunk);
        Spans {
            ready: &mut self.ready,
        }
    }

    /// Scans `chunk` without draining anything.
    pub fn push(&mut self, chunk: &str) {
        self.scanner.scan(chunk, &mut self.ready);
    }

    /// Takes the oldest completed span.
    pub fn next_span(&mut self) -> Option<String> {
        self.ready.pop()
    }

    /// Completed spans not yet taken.
    #[must_use]
    pub fn ready_len(&self) -> usize {
        self.ready.len()
    }

    /// Bytes buffered since the last completed span.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.scanner.pending_len()
    }

    /// Current `(object, array)` depth counters.
    #[must_use]
    pub fn depths(&self) -> (isize, isize) {
        self.scanner.depths()
    }

    /// Marks the end of input.
    ///
    /// The returned iterator yields the spans still queued, then the outcome
    /// of the configured [`EndOfStream`] policy. Consuming `self` makes
    /// feeding an exhausted stream impossible.
    #[must_use]
    pub fn finish(self) -> ClosedSplitter {
        ClosedSplitter {
            ready: self.ready,
            tail: self.scanner.finish(self.end_of_stream).transpose(),
        }
    }
}

/// Spans completed by [`StreamSplitter::feed`].
#[derive(Debug)]
pub struct Spans<'a> {
    ready: &'a mut ReadyQueue,
}

impl Iterator for Spans<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.ready.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.ready.len(), Some(self.ready.len()))
    }
}

impl ExactSizeIterator for Spans<'_> {}

/// A [`StreamSplitter`] closed to further input.
///
/// Yields the queued spans, then at most one item produced by the end of
/// stream policy.
#[derive(Debug)]
pub struct ClosedSplitter {
    ready: ReadyQueue,
    tail: Option<Result<String, UnterminatedValue>>,
}

impl Iterator for ClosedSplitter {
    type Item = Result<String, UnterminatedValue>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.ready.pop() {
            Some(span) => Some(Ok(span)),
            None => self.tail.take(),
        }
    }
}

impl core::iter::FusedIterator for ClosedSplitter {}
