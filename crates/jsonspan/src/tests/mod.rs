mod property_multivalue;

use alloc::{string::String, vec::Vec};

use crate::{SplitterOptions, StreamSplitter};

/// Feeds `chunks` through a fresh splitter and collects every span,
/// including the end of stream outcome.
pub(crate) fn split_all<S: AsRef<str>>(chunks: &[S], options: SplitterOptions) -> Vec<String> {
    let mut splitter = StreamSplitter::new(options);
    let mut spans = Vec::new();
    for chunk in chunks {
        spans.extend(splitter.feed(chunk.as_ref()));
    }
    spans.extend(splitter.finish().map(Result::unwrap));
    spans
}
