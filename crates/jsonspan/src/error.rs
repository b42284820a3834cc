use alloc::string::String;

use thiserror::Error;

/// A candidate value was still open when the input ended.
///
/// Produced only under [`EndOfStream::Error`](crate::EndOfStream::Error).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unterminated value at byte {offset} ({} bytes pending)", .pending.len())]
pub struct UnterminatedValue {
    /// Stream-wide byte offset of the candidate's opening delimiter.
    pub offset: usize,
    /// The candidate's text from its opening delimiter to end of input.
    pub pending: String,
}

/// Failure surfaced by [`JsonSplitter`](crate::JsonSplitter).
#[derive(Error, Debug)]
pub enum SplitError<E> {
    /// The chunk source failed; the error is passed through untouched.
    #[error(transparent)]
    Source(E),
    /// Input ended inside a value.
    #[error(transparent)]
    Unterminated(#[from] UnterminatedValue),
}

impl<E> SplitError<E> {
    /// The chunk source's error, if that is what this is.
    pub fn into_source(self) -> Option<E> {
        match self {
            SplitError::Source(err) => Some(err),
            SplitError::Unterminated(_) => None,
        }
    }
}
