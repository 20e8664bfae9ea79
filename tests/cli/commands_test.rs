//! CLI contract: exit codes, output files and messages.

use std::fs;
use std::path::Path;

use assert_cmd::Command;

const TEMPLATE: &str = include_str!("../../templates/metadata_template.json");

fn cli() -> Command {
    Command::cargo_bin("proposal-generator").expect("binary built")
}

fn project_with(dir: &Path, metadata: &str) {
    fs::write(dir.join("metadata.json"), metadata).expect("write metadata");
}

fn contains(haystack: &[u8], needle: &str) -> bool {
    String::from_utf8_lossy(haystack).contains(needle)
}

#[test]
fn validate_accepts_template_project() {
    let dir = tempfile::tempdir().expect("tempdir");
    project_with(dir.path(), TEMPLATE);
    let output = cli()
        .arg("validate")
        .arg(dir.path())
        .output()
        .expect("run validate");
    assert!(output.status.success());
    assert!(contains(&output.stdout, "metadata OK: Client Name"));
}

#[test]
fn validate_rejects_missing_client() {
    let dir = tempfile::tempdir().expect("tempdir");
    project_with(dir.path(), r#"{"metadata": {"proposal_date": "2026-01-01"}}"#);
    let output = cli()
        .arg("validate")
        .arg(dir.path())
        .output()
        .expect("run validate");
    assert!(!output.status.success());
    assert!(contains(&output.stderr, "client_name"));
}

#[test]
fn validate_rejects_malformed_json() {
    let dir = tempfile::tempdir().expect("tempdir");
    project_with(dir.path(), "{not json");
    cli().arg("validate").arg(dir.path()).assert().failure();
}

#[test]
fn validate_rejects_missing_project() {
    let dir = tempfile::tempdir().expect("tempdir");
    cli()
        .arg("validate")
        .arg(dir.path().join("nowhere"))
        .assert()
        .failure();
}

#[test]
fn generate_writes_document() {
    let dir = tempfile::tempdir().expect("tempdir");
    project_with(dir.path(), TEMPLATE);
    let out = dir.path().join("out").join("Proposal.html");

    let output = cli()
        .arg("generate")
        .arg(dir.path())
        .arg(&out)
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .output()
        .expect("run generate");
    assert!(output.status.success());
    assert!(contains(&output.stdout, "Proposal generated"));

    let html = fs::read_to_string(&out).expect("document written");
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("Client Name"));
    assert!(!html.contains("{{"));
    assert!(!out.with_file_name("Proposal_data.json").exists());
}

#[test]
fn generate_honours_configured_branding() {
    let dir = tempfile::tempdir().expect("tempdir");
    project_with(dir.path(), TEMPLATE);
    let config = dir.path().join("config.toml");
    fs::write(&config, "[branding]\ncompany_name = \"Northwind Media\"\n").expect("write config");
    let out = dir.path().join("Proposal.html");

    cli()
        .arg("generate")
        .arg(dir.path())
        .arg(&out)
        .arg("--config")
        .arg(&config)
        .assert()
        .success();
    let html = fs::read_to_string(&out).expect("document written");
    assert!(html.contains("Northwind Media"));
}

#[test]
fn generate_fails_without_writing_for_bad_input() {
    let dir = tempfile::tempdir().expect("tempdir");
    project_with(dir.path(), r#"{"metadata": {}}"#);
    let out = dir.path().join("Proposal.html");
    cli()
        .arg("generate")
        .arg(dir.path())
        .arg(&out)
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .assert()
        .failure();
    assert!(!out.exists());
}

#[test]
fn init_scaffolds_project() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = cli()
        .arg("init")
        .arg("Acme Corp")
        .arg("--dir")
        .arg(dir.path())
        .output()
        .expect("run init");
    assert!(output.status.success());
    assert!(contains(&output.stdout, "Created proposal project for: Acme Corp"));
    assert!(dir.path().join("ACME_CORP").join("metadata.json").is_file());

    cli()
        .arg("init")
        .arg("Acme Corp")
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .failure();
}
