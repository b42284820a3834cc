#![allow(missing_docs)]

use core::fmt::Write;

use jsonspan::{
    EndOfStream, JsonSplitter, SplitError, SplitterOptions, TryIterSource, chunk_utils,
    split_chunks,
};

// A JSON-Lines log with a pretty-printed record, a stray string line and a
// wrapper array. Chunks are cut on awkward seams on purpose.
#[rustfmt::skip]
const LOG: [&str; 8] = [
    "{\"ts\":1,\"level\":\"info\",\"msg\":\"boot\"}\n{\"ts\":2,\"le",           // record split inside a key
    r#"vel":"warn","msg":"disk \"sda\" at 91%"}"#,                              // escaped quotes in a value
    "\n\"plain string line\"\n[",                                               // bare string, then the wrapper opens
    r#"{"ts":3,"tags":["a","b"]},{"ts":4,"nested":{"x":[[1],[2]]}}"#,           // two records inside the wrapper
    "]\n{\n  \"ts\": 5,\n  \"msg\": \"multi\\\\nline {not a brace}\"\n",     // wrapper closes, pretty record opens
    "}\n",                                                                      // pretty record closes
    "[[1,2],[3]]\n",                                                            // arrays inside a wrapper
    r#"{"ts":6,"unterminated":"#,                                               // never closes
];

fn render(spans: &[String]) -> String {
    let mut out = String::new();
    for (i, span) in spans.iter().enumerate() {
        writeln!(out, "{i}: {}", span.replace('\n', "\\n")).unwrap();
    }
    out
}

#[test]
fn snapshot_log_spans() {
    let spans: Vec<String> = split_chunks(LOG).map(Result::unwrap).collect();

    insta::assert_snapshot!(render(&spans), @r#"
    0: {"ts":1,"level":"info","msg":"boot"}
    1: {"ts":2,"level":"warn","msg":"disk \"sda\" at 91%"}
    2: "plain string line"
    3: {"ts":3,"tags":["a","b"]}
    4: {"ts":4,"nested":{"x":[[1],[2]]}}
    5: {\n  "ts": 5,\n  "msg": "multi\\nline {not a brace}"\n}
    6: [1,2]
    7: [3]
    "#);
}

#[test]
fn log_spans_parse_as_json() {
    for span in split_chunks(LOG).map(Result::unwrap) {
        serde_json::from_str::<serde_json::Value>(&span)
            .unwrap_or_else(|err| panic!("{span:?} is not JSON: {err}"));
    }
}

#[test]
fn log_spans_do_not_depend_on_chunking() {
    let joined = LOG.concat();
    let expected: Vec<String> = split_chunks(LOG).map(Result::unwrap).collect();

    let per_char: Vec<String> = split_chunks(chunk_utils::char_chunks(&joined))
        .map(Result::unwrap)
        .collect();
    assert_eq!(per_char, expected);

    for seed in 0..64 {
        let chunks = chunk_utils::split_with_seed(&joined, seed);
        let spans: Vec<String> = split_chunks(chunks).map(Result::unwrap).collect();
        assert_eq!(spans, expected, "seed {seed}");
    }
}

#[test]
fn log_tail_under_each_policy() {
    let run = |end_of_stream| {
        let options = SplitterOptions {
            end_of_stream,
            ..Default::default()
        };
        JsonSplitter::new(TryIterSource::new(LOG.map(Ok::<_, std::io::Error>)), options)
            .last()
            .expect("log yields spans")
    };

    assert_eq!(run(EndOfStream::Discard).unwrap(), "[3]");
    assert_eq!(
        run(EndOfStream::Emit).unwrap(),
        r#"{"ts":6,"unterminated":"#
    );
    match run(EndOfStream::Error) {
        Err(SplitError::Unterminated(err)) => {
            assert_eq!(err.pending, r#"{"ts":6,"unterminated":"#);
            assert_eq!(err.offset, LOG.concat().len() - err.pending.len());
        }
        other => panic!("expected unterminated value, got {other:?}"),
    }
}
