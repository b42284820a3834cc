use alloc::{collections::VecDeque, string::String};

/// FIFO of completed spans waiting for a consumer.
///
/// The [`Scanner`](crate::Scanner) appends at the tail while it works through
/// a chunk; consumers take from the head one span at a time. An empty queue is
/// the signal to pull the next chunk from upstream.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReadyQueue {
    spans: VecDeque<String>,
}

impl ReadyQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a completed span.
    pub fn push(&mut self, span: String) {
        self.spans.push_back(span);
    }

    /// Removes the oldest span.
    pub fn pop(&mut self) -> Option<String> {
        self.spans.pop_front()
    }

    /// Number of spans waiting.
    #[must_use]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Whether the next pull has to go upstream.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

impl Iterator for ReadyQueue {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.pop()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn drains_in_arrival_order() {
        let mut queue = ReadyQueue::new();
        queue.push("{}".into());
        queue.push("[]".into());
        queue.push("\"\"".into());
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.by_ref().collect::<Vec<_>>(), ["{}", "[]", "\"\""]);
        assert!(queue.is_empty());
    }
}
