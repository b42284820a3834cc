#![allow(missing_docs)]

use std::{
    io::Write,
    process::{Command, Output, Stdio},
};

use rstest::rstest;

fn jsonspan(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_jsonspan"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> &str {
    std::str::from_utf8(&output.stdout).unwrap()
}

const MIXED: &str = "{\"a\": 2353}\n{\n  \"b\": [1, 2]\n}\n[\"s\", {\"c\": 1}]\n{oops}\n";

#[rstest]
#[case::verbatim(&[], "{\"a\": 2353}\n{\n  \"b\": [1, 2]\n}\n\"s\"\n{\"c\": 1}\n{oops}\n")]
#[case::valid_only(&["--valid-only"], "{\"a\": 2353}\n{\n  \"b\": [1, 2]\n}\n\"s\"\n{\"c\": 1}\n")]
#[case::compact(&["--compact"], "{\"a\":2353}\n{\"b\":[1,2]}\n\"s\"\n{\"c\":1}\n")]
#[case::unwrap(&["--compact", "--unwrap-strings", "-"], "{\"a\":2353}\n{\"b\":[1,2]}\ns\n{\"c\":1}\n")]
fn output_modes(#[case] args: &[&str], #[case] expected: &str) {
    let output = jsonspan(args, MIXED);
    assert!(output.status.success());
    assert_eq!(stdout(&output), expected);
}

#[rstest]
#[case::discard("discard", true, "{}\n")]
#[case::emit("emit", true, "{}\n{\"open\": 1\n")]
#[case::error("error", false, "{}\n")]
fn unterminated_tail(#[case] policy: &str, #[case] success: bool, #[case] expected: &str) {
    let output = jsonspan(&["--on-eof", policy], "{}\n{\"open\": 1\n");
    assert_eq!(output.status.success(), success);
    assert_eq!(stdout(&output), expected);
}

#[test]
fn emit_after_wrapper_prints_only_values() {
    let output = jsonspan(&["--on-eof", "emit"], "[{\"a\": 2353}, {\"a\": 646}]\n");
    assert!(output.status.success());
    assert_eq!(stdout(&output), "{\"a\": 2353}\n{\"a\": 646}\n");
}

#[test]
fn unterminated_error_is_reported() {
    let output = jsonspan(&["--on-eof", "error"], "{}\n{\"open\": 1\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unterminated value at byte 3"), "{stderr}");
}

#[test]
fn missing_file_fails() {
    let output = jsonspan(&["/nonexistent/input.jsonl"], "");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("/nonexistent/input.jsonl"));
}
