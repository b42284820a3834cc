use core::convert::Infallible;

/// Upstream producer of text chunks.
///
/// Chunk boundaries carry no meaning: they may split values, strings, escape
/// sequences or lines anywhere (between characters).
pub trait ChunkSource {
    /// One piece of text.
    type Chunk: AsRef<str>;
    /// Failure reported by the producer.
    type Error;

    /// Returns the next chunk, or `Ok(None)` once the source is exhausted.
    ///
    /// # Errors
    ///
    /// Whatever the producer fails with; it is handed to the consumer as is.
    fn next_chunk(&mut self) -> Result<Option<Self::Chunk>, Self::Error>;
}

/// Chunk source over an infallible iterator of strings.
#[derive(Debug, Clone)]
pub struct IterSource<I> {
    chunks: I,
}

impl<I> IterSource<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    /// Wraps anything that iterates over string-like chunks.
    pub fn new<T>(chunks: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self {
            chunks: chunks.into_iter(),
        }
    }
}

impl<I> ChunkSource for IterSource<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Chunk = I::Item;
    type Error = Infallible;

    fn next_chunk(&mut self) -> Result<Option<Self::Chunk>, Self::Error> {
        Ok(self.chunks.next())
    }
}

/// Chunk source over an iterator of `Result`s, e.g. lines read from a socket.
#[derive(Debug, Clone)]
pub struct TryIterSource<I> {
    results: I,
}

impl<I, S, E> TryIterSource<I>
where
    I: Iterator<Item = Result<S, E>>,
    S: AsRef<str>,
{
    /// Wraps anything that iterates over fallible string-like chunks.
    pub fn new<T>(results: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self {
            results: results.into_iter(),
        }
    }
}

impl<I, S, E> ChunkSource for TryIterSource<I>
where
    I: Iterator<Item = Result<S, E>>,
    S: AsRef<str>,
{
    type Chunk = S;
    type Error = E;

    fn next_chunk(&mut self) -> Result<Option<S>, E> {
        self.results.next().transpose()
    }
}

#[cfg(feature = "std")]
pub use self::lines::LineSource;

#[cfg(feature = "std")]
mod lines {
    use alloc::string::String;
    use std::io::{self, BufRead};

    use super::ChunkSource;

    /// Chunk source yielding the lines of a reader, line terminators included.
    ///
    /// Input that is not valid UTF-8 fails with
    /// [`io::ErrorKind::InvalidData`].
    #[derive(Debug)]
    pub struct LineSource<R> {
        reader: R,
        lines_read: u64,
    }

    impl<R: BufRead> LineSource<R> {
        /// Reads lines from `reader`.
        pub fn new(reader: R) -> Self {
            Self {
                reader,
                lines_read: 0,
            }
        }

        /// Number of lines handed out so far.
        #[must_use]
        pub fn lines_read(&self) -> u64 {
            self.lines_read
        }
    }

    impl<R: BufRead> ChunkSource for LineSource<R> {
        type Chunk = String;
        type Error = io::Error;

        fn next_chunk(&mut self) -> io::Result<Option<String>> {
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.lines_read += 1;
            Ok(Some(line))
        }
    }
}
