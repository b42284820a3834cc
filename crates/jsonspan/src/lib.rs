//! Incremental splitter for streams of concatenated JSON values.
//!
//! `jsonspan` takes text in arbitrary chunks (lines of a log file, reads from a
//! socket, single characters) and hands back the exact source text of every
//! complete top-level value: objects, arrays nested inside an outer wrapper
//! array, and bare string literals. JSON Lines, pretty-printed documents and
//! a mix of both work the same way, and chunk boundaries never need to line
//! up with value boundaries.
//!
//! Spans are returned verbatim. Nothing is parsed or validated; hand the
//! spans to a JSON parser if structured values are needed.
//!
//! ```rust
//! let log = [
//!     "{\"level\":\"info\",\"msg\":\"started\"}\n",
//!     "{\n",
//!     "  \"level\": \"warn\",\n",
//!     "  \"msg\": \"slow \\\"disk\\\"\"\n",
//!     "}\n",
//!     "\"stray line\"\n",
//! ];
//! let spans: Vec<String> = jsonspan::split_chunks(log).map(Result::unwrap).collect();
//! assert_eq!(spans.len(), 3);
//! assert_eq!(spans[2], "\"stray line\"");
//! ```
//!
//! Layers, from the bottom up:
//!
//! - [`Scanner`] and [`ReadyQueue`]: the state machine and its output queue.
//! - [`StreamSplitter`]: push API, `feed` chunks and `finish`.
//! - [`JsonSplitter`]: pull API over a [`ChunkSource`].

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod buffer;
pub mod chunk_utils;
mod driver;
mod error;
mod options;
mod queue;
mod scanner;
mod source;
mod splitter;

#[cfg(test)]
mod tests;

pub use driver::JsonSplitter;
pub use error::{SplitError, UnterminatedValue};
pub use options::{DEFAULT_COMPACT_THRESHOLD, EndOfStream, SplitterOptions};
pub use queue::ReadyQueue;
pub use scanner::Scanner;
#[cfg(feature = "std")]
pub use source::LineSource;
pub use source::{ChunkSource, IterSource, TryIterSource};
pub use splitter::{ClosedSplitter, Spans, StreamSplitter};

/// Splits an in-memory sequence of chunks with default options.
pub fn split_chunks<I>(chunks: I) -> JsonSplitter<IterSource<I::IntoIter>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    JsonSplitter::new(IterSource::new(chunks), SplitterOptions::default())
}

/// Splits the lines of `reader` with default options.
///
/// ```rust
/// use std::io::Cursor;
///
/// let input = Cursor::new("{\"a\": 1}\n[\"wrapped\", {\"b\": 2}]\n");
/// let spans = jsonspan::split_reader(input)
///     .collect::<Result<Vec<_>, _>>()
///     .unwrap();
/// assert_eq!(spans, ["{\"a\": 1}", "\"wrapped\"", "{\"b\": 2}"]);
/// ```
#[cfg(feature = "std")]
pub fn split_reader<R: std::io::BufRead>(reader: R) -> JsonSplitter<LineSource<R>> {
    JsonSplitter::new(LineSource::new(reader), SplitterOptions::default())
}
