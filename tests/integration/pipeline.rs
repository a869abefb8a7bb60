//! End-to-end pipeline tests
//!
//! Drive the challenge path the way the binary does: a base64 JSON
//! payload in, report lines out. File execution goes through a real
//! temporary file.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use mysticvm::challenge::{decode_batch, solve, solve_stream, Report};
use mysticvm::vm::VMConfig;
use serde_json::json;
use std::io::Write as _;

fn payload_of(cases: Vec<serde_json::Value>) -> String {
    STANDARD.encode(json!({ "data": cases }).to_string().as_bytes())
}

#[test]
fn test_full_payload_to_report_lines() {
    // case 1: the worked arithmetic example
    let sum_program = [0x01, 7, 0, 0x01, 3, 1, 0x02, 1, 0, 0x07, 0, 50, 0xFF];
    // case 2: a faulting jump with memory written beforehand
    let fault_program = [0x01, 9, 0, 0x07, 0, 10, 0x04, 200];
    let payload = payload_of(vec![
        json!({
            "pcap": STANDARD.encode(b"noise ABC{12345} noise"),
            "myst": STANDARD.encode(sum_program),
            "memory_address": 50,
        }),
        json!({
            "pcap": STANDARD.encode(b"no marker"),
            "myst": STANDARD.encode(fault_program),
            "memory_address": 10,
        }),
    ]);

    let mut output = Vec::new();
    solve_stream(payload.as_bytes(), &mut output, &VMConfig::default(), true)
        .expect("pipeline runs");

    // 12345 mod 10007 = 2338, plus 3
    let text = String::from_utf8(output).unwrap();
    assert_eq!(text, "42 2341 10\n42 0 9\n");
}

#[test]
fn test_solve_matches_stream_output() {
    let payload = payload_of(vec![json!({
        "pcap": STANDARD.encode(b"ABC{1}"),
        "myst": STANDARD.encode([0xFFu8]),
        "memory_address": 0,
    })]);
    let batch = decode_batch(&payload).expect("payload decodes");
    let reports = solve(&batch, &VMConfig::default(), false);
    assert_eq!(
        reports,
        vec![Report {
            bitmap: 42,
            capture: 4,
            machine: 0,
        }]
    );
}

#[test]
fn test_garbage_stdin_yields_single_zero_line() {
    let mut output = Vec::new();
    solve_stream(
        "@@@ not a payload @@@".as_bytes(),
        &mut output,
        &VMConfig::default(),
        true,
    )
    .expect("pipeline degrades");
    assert_eq!(String::from_utf8(output).unwrap(), "0 0 0\n");
}

#[test]
fn test_run_file_executes_program_from_disk() {
    let program = [0x01, 7, 0, 0x01, 3, 1, 0x02, 1, 0, 0x07, 0, 50, 0xFF];
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(&program).expect("write program");

    let result = mysticvm::run_file(file.path(), 50, VMConfig::default()).expect("file runs");
    assert_eq!(result, 10);
}

#[test]
fn test_run_file_missing_path_is_an_error() {
    let result = mysticvm::run_file(
        std::path::Path::new("/nonexistent/program.myst"),
        0,
        VMConfig::default(),
    );
    assert!(result.is_err());
}
