// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI integration tests.
//!
//! These tests run the actual typecodec binary and verify its behavior.

mod common;

use std::process::{Command, Output};

use common::fixture_path;

const KEYED_LINKS: &str = "mapping<string, sequence<ReferenceLink>>";

/// Run typecodec with arguments
fn run(args: &[&str]) -> Output {
    let bin = env!("CARGO_BIN_EXE_typecodec");
    Command::new(bin)
        .args(args)
        .output()
        .unwrap_or_else(|_| panic!("Failed to run {:?}", bin))
}

/// Run typecodec and assert success
fn run_ok(args: &[&str]) -> String {
    let output = run(args);
    assert!(
        output.status.success(),
        "Command failed: {:?}\nstdout: {}\nstderr: {}",
        args,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run typecodec and assert failure
fn run_err(args: &[&str]) -> Output {
    let output = run(args);
    assert!(
        !output.status.success(),
        "Command should have failed but succeeded: {:?}",
        args
    );
    output
}

fn fixture(name: &str) -> String {
    fixture_path(name).to_string_lossy().to_string()
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_cli_help() {
    let output = run_ok(&["--help"]);
    assert!(output.contains("Decode JSON against explicit type descriptors"));
    assert!(output.contains("decode"));
    assert!(output.contains("describe"));
    assert!(output.contains("schema"));
}

#[test]
fn test_cli_version() {
    let output = run_ok(&["--version"]);
    assert!(output.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_unknown_command() {
    run_err(&["transcode"]);
}

// ============================================================================
// Decode Command Tests
// ============================================================================

#[test]
fn test_cli_decode_keyed_links() {
    let schema = fixture("links.toml");
    let input = fixture("keyed_links.json");
    let output = run_ok(&["decode", "-s", &schema, "-t", KEYED_LINKS, &input]);

    let decoded: serde_json::Value = serde_json::from_str(output.trim()).unwrap();
    assert_eq!(decoded["key"][0]["urlStylised"], "urlStylised");
    assert_eq!(decoded["key"][0]["splashScreenTypeId"], 1);
    assert!(decoded["key"][0]["textShort"].is_null());
    assert_eq!(decoded["other"], serde_json::json!([]));
}

#[test]
fn test_cli_decode_skip_absent() {
    let schema = fixture("links.toml");
    let input = fixture("keyed_links.json");
    let output = run_ok(&[
        "decode",
        "-s",
        &schema,
        "-t",
        KEYED_LINKS,
        "--skip-absent",
        &input,
    ]);

    let decoded: serde_json::Value = serde_json::from_str(output.trim()).unwrap();
    assert!(decoded["key"][0].get("textShort").is_none());
    assert_eq!(decoded["key"][0]["textLong"], "textLong");
}

#[test]
fn test_cli_decode_naive() {
    let schema = fixture("links.toml");
    let input = fixture("keyed_links.json");
    let output = run_ok(&["decode", "-s", &schema, "-t", KEYED_LINKS, "--naive", &input]);

    // Elements come back untyped, so the document is echoed as-is
    let decoded: serde_json::Value = serde_json::from_str(output.trim()).unwrap();
    let original: serde_json::Value =
        serde_json::from_str(&common::read_fixture("keyed_links.json")).unwrap();
    assert_eq!(decoded, original);
}

#[test]
fn test_cli_decode_generic_record() {
    let schema = fixture("links.toml");
    let input = fixture("plans.json");
    let output = run_ok(&["decode", "-s", &schema, "-t", "MultiResult<Plan>", &input]);

    let decoded: serde_json::Value = serde_json::from_str(output.trim()).unwrap();
    assert_eq!(decoded["result"][1]["id"], "p2");
}

#[test]
fn test_cli_decode_lines_reports_failures() {
    let schema = fixture("links.toml");
    let input = fixture("links.jsonl");
    let output = run_err(&["decode", "-s", &schema, "-t", "ReferenceLink", "--lines", &input]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stdout.lines().count(), 2);
    assert!(stdout.contains(r#""urlStylised":"c""#));
    // Third document sits on line 4, after a blank line
    assert!(stderr.contains("line 4: Missing required field 'urlUnstylised'"));
    assert!(stderr.contains("urlUnstylised"));
    assert!(stderr.contains("1 of 3 document(s) failed to decode"));
}

#[test]
fn test_cli_decode_reject_unknown() {
    let schema = fixture("links.toml");
    let input = fixture("plans.json");
    let output = run_err(&[
        "decode",
        "-s",
        &schema,
        "-t",
        "Plan",
        "--reject-unknown",
        &input,
    ]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown field 'result'"));
}

#[test]
fn test_cli_decode_unknown_record() {
    let input = fixture("plans.json");
    let output = run_err(&["decode", "-t", "MultiResult<Plan>", &input]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown type 'MultiResult'"));
}

#[test]
fn test_cli_decode_invalid_type() {
    let input = fixture("plans.json");
    let output = run_err(&["decode", "-t", "sequence<", &input]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid type 'sequence<'"));
}

#[test]
fn test_cli_decode_missing_input() {
    run_err(&["decode", "-t", "string", "/nonexistent/input.json"]);
}

// ============================================================================
// Describe Command Tests
// ============================================================================

#[test]
fn test_cli_describe() {
    let output = run_ok(&["describe", "map<string, list<ReferenceLink?>>"]);
    assert!(output.contains("mapping<string, sequence<nullable<ReferenceLink>>>"));
    assert!(output.contains("runtime class: mapping"));
    assert!(output.contains("ReferenceLink"));
}

#[test]
fn test_cli_describe_json() {
    let output = run_ok(&["describe", "--json", "MultiResult<Plan>"]);
    let description: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(description["descriptor"], "MultiResult<Plan>");
    assert_eq!(description["runtime_class"], "MultiResult");
    assert_eq!(description["records"], serde_json::json!(["MultiResult", "Plan"]));
}

#[test]
fn test_cli_describe_checks_schema() {
    let schema = fixture("links.toml");
    run_ok(&["describe", "-s", &schema, "MultiResult<Plan>"]);

    let output = run_err(&["describe", "-s", &schema, "sequence<Missing>"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Record 'Missing' is not declared in the schema"));

    let output = run_err(&["describe", "-s", &schema, "MultiResult"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("takes 1 type argument(s), got 0"));
}

// ============================================================================
// Schema Command Tests
// ============================================================================

#[test]
fn test_cli_schema_list() {
    let schema = fixture("links.toml");
    let output = run_ok(&["schema", "list", &schema]);
    assert!(output.contains("Records: 4"));
    assert!(output.contains("  ReferenceLink (6 fields)"));
    assert!(output.contains("  MultiResult<T> (1 fields)"));
}

#[test]
fn test_cli_schema_show() {
    let schema = fixture("links.toml");
    let output = run_ok(&["schema", "show", &schema, "ReferenceLink"]);
    assert!(output.starts_with("ReferenceLink\n"));
    assert!(output.contains("  urlStylised: string\n"));
    assert!(output.contains("  textShort: nullable<string> (optional)"));
    assert!(output.contains("  splashScreenTypeId: int32\n"));
}

#[test]
fn test_cli_schema_show_json() {
    let schema = fixture("links.toml");
    let output = run_ok(&["schema", "show", "--json", &schema, "MultiResult"]);
    let shown: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(shown["params"], serde_json::json!(["T"]));
    assert_eq!(shown["fields"][0]["type"], "sequence<T>");
    assert_eq!(shown["fields"][0]["required"], true);
}

#[test]
fn test_cli_schema_show_missing_record() {
    let schema = fixture("links.toml");
    let output = run_err(&["schema", "show", &schema, "Missing"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Record 'Missing' not found"));
}
