use alloc::string::String;
use core::{iter::FusedIterator, mem};

use log::debug;

use crate::{
    error::SplitError,
    options::SplitterOptions,
    source::ChunkSource,
    splitter::{ClosedSplitter, StreamSplitter},
};

/// Lazy, single-pass sequence of spans pulled from a [`ChunkSource`].
///
/// A new chunk is requested only when every span from earlier chunks has been
/// handed out, so at most one chunk's worth of scanning is ever ahead of the
/// consumer. Once the source reports exhaustion it is dropped, the end of
/// stream policy runs, and the iterator is fused.
///
/// A source error is yielded as [`SplitError::Source`] without touching the
/// buffered state; pulling again asks the source for its next chunk.
///
/// # Examples
///
/// ```rust
/// let spans: Vec<String> = jsonspan::split_chunks(["\"hello\"", "\"world\""])
///     .map(Result::unwrap)
///     .collect();
/// assert_eq!(spans, ["\"hello\"", "\"world\""]);
/// ```
pub struct JsonSplitter<S: ChunkSource> {
    state: State<S>,
    chunks_read: u64,
}

enum State<S> {
    Open {
        source: S,
        splitter: StreamSplitter,
    },
    Closing(ClosedSplitter),
    Done,
}

impl<S: ChunkSource> JsonSplitter<S> {
    /// Creates a splitter that pulls from `source`.
    pub fn new(source: S, options: SplitterOptions) -> Self {
        Self {
            state: State::Open {
                source,
                splitter: StreamSplitter::new(options),
            },
            chunks_read: 0,
        }
    }

    /// Number of chunks pulled from the source so far.
    #[must_use]
    pub fn chunks_read(&self) -> u64 {
        self.chunks_read
    }

    /// Whether the source has been exhausted (and released).
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        !matches!(self.state, State::Open { .. })
    }

    fn close(&mut self) {
        if let State::Open { splitter, .. } = mem::replace(&mut self.state, State::Done) {
            debug!("chunk source exhausted after {} chunks", self.chunks_read);
            self.state = State::Closing(splitter.finish());
        }
    }
}

impl<S: ChunkSource> Iterator for JsonSplitter<S> {
    type Item = Result<String, SplitError<S::Error>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let exhausted = match &mut self.state {
                State::Open { source, splitter } => {
                    if let Some(span) = splitter.next_span() {
                        return Some(Ok(span));
                    }
                    match source.next_chunk() {
                        Ok(Some(chunk)) => {
                            self.chunks_read += 1;
                            splitter.push(chunk.as_ref());
                            false
                        }
                        Ok(None) => true,
                        Err(err) => return Some(Err(SplitError::Source(err))),
                    }
                }
                State::Closing(closed) => match closed.next() {
                    Some(item) => return Some(item.map_err(SplitError::Unterminated)),
                    None => true,
                },
                State::Done => return None,
            };

            if exhausted {
                if matches!(self.state, State::Closing(_)) {
                    self.state = State::Done;
                } else {
                    self.close();
                }
            }
        }
    }
}

impl<S: ChunkSource> FusedIterator for JsonSplitter<S> {}

impl<S: ChunkSource> core::fmt::Debug for JsonSplitter<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let state = match &self.state {
            State::Open { .. } => "open",
            State::Closing(_) => "closing",
            State::Done => "done",
        };
        f.debug_struct("JsonSplitter")
            .field("state", &state)
            .field("chunks_read", &self.chunks_read)
            .finish_non_exhaustive()
    }
}
