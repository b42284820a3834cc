//! Helpers for cutting text into chunks, shared by tests, benches and the
//! fuzz target.

use alloc::vec::Vec;

/// Cut `payload` into `parts` pieces of roughly equal byte length.
///
/// A cut that would land inside a multi-byte character moves forward to the
/// next char boundary, so the last pieces may be shorter or missing.
///
/// # Panics
///
/// Panics if `parts` is zero.
#[must_use]
pub fn produce_chunks(payload: &str, parts: usize) -> Vec<&str> {
    assert!(parts > 0, "cannot cut text into zero parts");
    let step = payload.len().div_ceil(parts);
    let mut rest = payload;
    core::iter::from_fn(|| {
        if rest.is_empty() {
            return None;
        }
        let mut cut = step.min(rest.len());
        while !rest.is_char_boundary(cut) {
            cut += 1;
        }
        let (chunk, tail) = rest.split_at(cut);
        rest = tail;
        Some(chunk)
    })
    .collect()
}

/// One chunk per character.
#[must_use]
pub fn char_chunks(payload: &str) -> Vec<&str> {
    payload
        .char_indices()
        .map(|(i, c)| &payload[i..i + c.len_utf8()])
        .collect()
}

/// Split `payload` into irregular chunks derived from `seed`.
///
/// The same seed always gives the same split. Every chunk is non-empty and
/// ends on a char boundary.
#[must_use]
pub fn split_with_seed(payload: &str, seed: u64) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut state = seed | 1;
    let mut start = 0;
    let len = payload.len();

    while start < len {
        // xorshift64
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;

        let remaining = len - start;
        #[allow(clippy::cast_possible_truncation)]
        let mut size = (state % remaining as u64) as usize + 1;
        while start + size < len && !payload.is_char_boundary(start + size) {
            size += 1;
        }

        chunks.push(&payload[start..start + size]);
        start += size;
    }

    chunks
}
