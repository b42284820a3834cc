//! Benchmark – `jsonspan::StreamSplitter` across chunk sizes
#![allow(missing_docs)]

use std::{fmt::Write, time::Duration};

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use jsonspan::{SplitterOptions, StreamSplitter, chunk_utils::produce_chunks};

/// Deterministic JSON-Lines payload of `records` lines, every fourth one
/// pretty-printed.
fn make_jsonl_payload(records: usize) -> String {
    let mut s = String::new();
    for i in 0..records {
        if i % 4 == 3 {
            writeln!(
                s,
                "{{\n  \"id\": {i},\n  \"tags\": [\"x\", \"y\"],\n  \"msg\": \"line \\\"{i}\\\" {{}}\"\n}}"
            )
            .unwrap();
        } else {
            writeln!(s, "{{\"id\":{i},\"tags\":[\"x\",\"y\"],\"msg\":\"line {i}\"}}").unwrap();
        }
    }
    s
}

/// Feed `payload` in `parts` chunks and count the spans produced.
fn run_splitter(payload: &str, parts: usize) -> usize {
    let mut splitter = StreamSplitter::new(SplitterOptions::default());
    let mut produced = 0usize;
    for chunk in produce_chunks(payload, parts) {
        produced += splitter.feed(chunk).count();
    }
    produced + splitter.finish().count()
}

fn bench_split(c: &mut Criterion) {
    let payload = make_jsonl_payload(10_000);
    let mut group = c.benchmark_group("split_jsonl");
    group.measurement_time(Duration::from_secs(5));
    group.throughput(Throughput::Bytes(payload.len() as u64));

    for parts in [1usize, 100, 10_000, payload.len() / 4] {
        group.bench_with_input(BenchmarkId::from_parameter(parts), &parts, |b, &parts| {
            b.iter(|| run_splitter(black_box(&payload), parts));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_split);
criterion_main!(benches);
