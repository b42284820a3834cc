#![no_main]
use std::cell::RefCell;

use arbitrary::Arbitrary;
use jsonspan::{EndOfStream, SplitterOptions, StreamSplitter, chunk_utils::split_with_seed};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use serde_json::{Map, Value};

const HEADER: usize = 5; // 1 flag byte + 4-byte split seed

thread_local! {
    static RNG: RefCell<SmallRng> = RefCell::new(SmallRng::from_os_rng());
}

// Separators a JSON-Lines or concatenated-JSON stream may carry between values.
static SEPARATORS: &[&[u8]] = &[b" ", b"\t", b"\n", b"\r\n", b",", b", ", b",\n"];

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

/// Mostly well-formed input: a flag byte, a seed, then whole values with
/// separators. One run in ten falls back to libFuzzer's byte mutations.
fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size < HEADER || seed.is_multiple_of(10) {
        if max_size < HEADER {
            return fuzzer_mutate(data, size, max_size);
        }
        data[0] = with_rng(|rng| rng.next_u32() as u8 & 0x07);
        data[1..HEADER].copy_from_slice(&with_rng(|rng| rng.next_u32().to_le_bytes()));

        let mut len = HEADER;
        let target = size.clamp(HEADER + 1, max_size);
        while len < target {
            let before = len;
            len += append_separator(&mut data[len..], max_size - len);
            len += append_value(&mut data[len..], size, max_size - len);
            if len == before {
                break;
            }
        }
        len
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

fn append_separator(buf: &mut [u8], limit: usize) -> usize {
    let sep = with_rng(|rng| SEPARATORS[rng.random_range(0..SEPARATORS.len())]);
    if sep.len() > limit {
        return 0;
    }
    buf[..sep.len()].copy_from_slice(sep);
    sep.len()
}

fn append_value(data: &mut [u8], size: usize, limit: usize) -> usize {
    if limit == 0 {
        return 0;
    }
    let value = loop {
        let s = with_rng(|rng| rng.random_range(size / 2..=size * 2).min(limit));
        let bytes: Vec<u8> = with_rng(|rng| (0..s).map(|_| rng.random::<u8>()).collect());
        if let Ok(value) = ArbitraryValue::arbitrary(&mut arbitrary::Unstructured::new(&bytes)) {
            break value;
        }
    };

    let serialized = if with_rng(|rng| rng.random::<bool>()) {
        serde_json::to_vec_pretty(&value.0)
    } else {
        serde_json::to_vec(&value.0)
    }
    .expect("serializing a serde_json::Value cannot fail");

    // Truncation leaves an unterminated value behind, which is worth fuzzing too.
    let len = serialized.len().min(limit);
    data[..len].copy_from_slice(&serialized[..len]);
    len
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

#[derive(Debug)]
struct ArbitraryValue(Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        let value = match u.choose_index(21)? {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 => {
                let n: f64 = u.arbitrary()?;
                Value::Number(
                    serde_json::Number::from_f64(n).ok_or(arbitrary::Error::IncorrectFormat)?,
                )
            }
            3..=10 => Value::String(u.arbitrary()?),
            11..=15 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                Value::Array(elems.into_iter().map(|v| v.0).collect())
            }
            16..=20 => {
                let m: Vec<(String, ArbitraryValue)> = u.arbitrary()?;
                Value::Object(Map::from_iter(m.into_iter().map(|(k, v)| (k, v.0))))
            }
            _ => Err(arbitrary::Error::IncorrectFormat)?,
        };
        Ok(ArbitraryValue(value))
    }
}

fn split_all(chunks: &[&str], options: SplitterOptions) -> Vec<Result<String, String>> {
    let mut splitter = StreamSplitter::new(options);
    let mut out: Vec<_> = Vec::new();
    for chunk in chunks {
        out.extend(splitter.feed(chunk).map(Ok));
    }
    out.extend(splitter.finish().map(|r| r.map_err(|e| e.to_string())));
    out
}

fn splitter(data: &[u8]) {
    if data.len() <= HEADER {
        return;
    }

    let flags = data[0];
    let split_seed = u64::from(u32::from_le_bytes([data[1], data[2], data[3], data[4]]));
    let text = String::from_utf8_lossy(&data[HEADER..]).into_owned();

    let options = SplitterOptions {
        end_of_stream: match flags & 3 {
            1 => EndOfStream::Emit,
            2 => EndOfStream::Error,
            _ => EndOfStream::Discard,
        },
        // Tiny thresholds force compaction on nearly every chunk.
        compact_threshold: if flags & 4 != 0 { 1 } else { 4096 },
    };

    let whole = split_all(&[&text], options);
    let chunked = split_all(&split_with_seed(&text, split_seed), options);
    assert_eq!(whole, chunked, "chunking changed the spans");

    let mut cursor = 0;
    for span in whole.iter().flatten() {
        let found = text[cursor..]
            .find(span.as_str())
            .expect("every span is a substring of the input, in order");
        cursor += found + span.len();
    }
}

fuzz_target!(|data: &[u8]| splitter(data));
