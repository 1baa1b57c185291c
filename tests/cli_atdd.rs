#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const RICH_SCHEMA: &str = r#"{
  "$schema": "https://json-schema.org/draft/2020-12/schema",
  "$id": "https://schemas.originvault.box/v1/Identity",
  "@context": ["https://schema.org", "https://www.w3.org/2018/credentials/v1"],
  "type": "object",
  "description": "Verifiable credential subject with a decentralized identifier",
  "examples": [{"id": "did:web:example.com"}],
  "required": ["id"],
  "properties": {
    "id": {"type": "string", "description": "DID", "pattern": "^did:", "examples": ["did:web:x"]},
    "metadata": {"type": "object", "description": "Metadata"},
    "timestamps": {"type": "object", "description": "Timestamps", "format": "date-time"},
    "blockchainSync": {"type": "boolean", "description": "Sync flag"}
  }
}"#;

const BARE_SCHEMA: &str = r#"{"$schema": "x", "type": "object", "properties": {}}"#;

fn write_schema(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).expect("schema should write");
}

fn schema_audit() -> Command {
    Command::cargo_bin("schema-audit").expect("binary should compile")
}

#[test]
fn analyze_rejects_missing_directory() {
    let dir = TempDir::new().expect("temp dir should be created");

    schema_audit()
        .arg("analyze")
        .arg(dir.path().join("missing"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("path does not exist"));
}

#[test]
fn analyze_prints_markdown_report_sorted_by_quality() {
    let dir = TempDir::new().expect("temp dir should be created");
    write_schema(dir.path(), "Bare.json", BARE_SCHEMA);
    write_schema(dir.path(), "Identity.json", RICH_SCHEMA);

    let output = schema_audit()
        .arg("analyze")
        .arg(dir.path())
        .assert()
        .code(0)
        .stdout(predicate::str::contains("# Schema Validation Report"))
        .stdout(predicate::str::contains("- **Total Schemas**: 2"))
        .stdout(predicate::str::contains("### 🟢 Identity"))
        .stdout(predicate::str::contains("### 🔴 Bare"))
        .get_output()
        .stdout
        .clone();

    let rendered = String::from_utf8(output).expect("stdout should be utf-8");
    let identity = rendered.find("### 🟢 Identity").expect("identity section");
    let bare = rendered.find("### 🔴 Bare").expect("bare section");
    assert!(identity < bare);
}

#[test]
fn analyze_json_reports_summary_and_results() {
    let dir = TempDir::new().expect("temp dir should be created");
    write_schema(dir.path(), "Identity.json", RICH_SCHEMA);

    schema_audit()
        .arg("analyze")
        .arg(dir.path())
        .arg("--format")
        .arg("json")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("\"avg_quality_score\""))
        .stdout(predicate::str::contains("\"bff_compatibility_rate\": 100.0"))
        .stdout(predicate::str::contains("\"name\": \"Identity\""));
}

#[test]
fn analyze_warns_when_a_schema_fails_to_load() {
    let dir = TempDir::new().expect("temp dir should be created");
    write_schema(dir.path(), "Identity.json", RICH_SCHEMA);
    write_schema(dir.path(), "Broken.json", "{ not json");

    schema_audit()
        .arg("analyze")
        .arg(dir.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("### ❌ Broken - ERROR"))
        .stdout(predicate::str::contains("- **Valid Schemas**: 1"))
        .stderr(predicate::str::contains("1 schema(s) failed to load"));
}

#[test]
fn analyze_empty_directory_reports_zero_rates() {
    let dir = TempDir::new().expect("temp dir should be created");

    schema_audit()
        .arg("analyze")
        .arg(dir.path())
        .assert()
        .code(0)
        .stdout(predicate::str::contains("- **Total Schemas**: 0"))
        .stdout(predicate::str::contains("- **BFF Compatibility**: 0.0%"));
}

#[test]
fn analyze_fail_under_blocks_low_quality_corpus() {
    let dir = TempDir::new().expect("temp dir should be created");
    write_schema(dir.path(), "Bare.json", BARE_SCHEMA);

    schema_audit()
        .arg("analyze")
        .arg(dir.path())
        .arg("--fail-under")
        .arg("3.0")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("below --fail-under"));
}

#[test]
fn analyze_writes_report_to_output_path() {
    let dir = TempDir::new().expect("temp dir should be created");
    write_schema(dir.path(), "Identity.json", RICH_SCHEMA);
    let out = dir.path().join("governance/schema-validation-report.md");

    schema_audit()
        .arg("analyze")
        .arg(dir.path())
        .arg("--output")
        .arg(&out)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("report written:"))
        .stdout(predicate::str::contains("total schemas: 1"));

    let report = fs::read_to_string(&out).expect("report should exist");
    assert!(report.contains("## Detailed Results"));
}

#[test]
fn analyze_uses_configured_output_and_principles() {
    let dir = TempDir::new().expect("temp dir should be created");
    write_schema(dir.path(), "Identity.json", RICH_SCHEMA);
    fs::write(
        dir.path().join("schema-audit.toml"),
        r#"
[report]
output = "reports/schemas.md"
title = "Vault Schemas"

[principles.audit_trail]
patterns = ["audit"]
weight = 0.1
"#,
    )
    .expect("config should write");

    schema_audit()
        .arg("analyze")
        .arg(dir.path())
        .assert()
        .code(0)
        .stdout(predicate::str::contains("report written:"));

    let report =
        fs::read_to_string(dir.path().join("reports/schemas.md")).expect("report should exist");
    assert!(report.starts_with("# Vault Schemas"));
    assert!(report.contains("| audit_trail | patterns | audit | 0.10 |"));
}

#[test]
fn analyze_rejects_invalid_principle_config() {
    let dir = TempDir::new().expect("temp dir should be created");
    fs::write(
        dir.path().join("schema-audit.toml"),
        r#"
[principles.neither]
weight = 0.1
"#,
    )
    .expect("config should write");

    schema_audit()
        .arg("analyze")
        .arg(dir.path())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("invalid principle 'neither'"));
}

#[test]
fn score_prints_factor_breakdown() {
    let dir = TempDir::new().expect("temp dir should be created");
    write_schema(dir.path(), "Bare.json", BARE_SCHEMA);

    schema_audit()
        .arg("score")
        .arg(dir.path().join("Bare.json"))
        .assert()
        .code(0)
        .stdout(predicate::str::contains("- **Quality Score**: 1.00/5.0"))
        .stdout(predicate::str::contains("- structure: 1.00"))
        .stdout(predicate::str::contains("- multi_root_trust: 0.00"));
}

#[test]
fn score_fails_on_malformed_schema() {
    let dir = TempDir::new().expect("temp dir should be created");
    write_schema(dir.path(), "Broken.json", "[1, 2]");

    schema_audit()
        .arg("score")
        .arg(dir.path().join("Broken.json"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("schema root must be a JSON object"));
}

#[test]
fn principles_lists_default_table() {
    let dir = TempDir::new().expect("temp dir should be created");

    schema_audit()
        .arg("principles")
        .arg(dir.path())
        .assert()
        .code(0)
        .stdout(predicate::str::contains("| bff_integration | required_properties |"))
        .stdout(predicate::str::contains("| did_integration | patterns | did:, DID,"));
}
