//! Loading metadata from text and project directories.

use std::fs;

use proposal_generator::metadata::{load_project, parse_metadata, Money, METADATA_FILE_NAME};
use proposal_generator::ProposalError;

const TEMPLATE: &str = include_str!("../../templates/metadata_template.json");

#[test]
fn bundled_template_parses_and_validates() {
    let metadata = parse_metadata(TEMPLATE).expect("template parses");
    assert!(metadata.validate().is_ok());
    assert_eq!(metadata.client_name().expect("client"), "Client Name");
    assert!(!metadata.strategy.pillars.is_empty());
}

#[test]
fn invalid_json_is_malformed_input() {
    for input in ["{not json", "\"text\"", r#"{"metadata": {"client_name": 7}}"#] {
        let err = parse_metadata(input).expect_err("should be malformed");
        assert!(
            matches!(err, ProposalError::MalformedInput(_)),
            "{input}: {err}"
        );
    }
}

#[test]
fn negative_money_is_malformed_input() {
    let json = r#"{"metadata": {"client_name": "Acme"},
        "investment": {"packages": [{"monthly_retainer": -100}]}}"#;
    assert!(matches!(
        parse_metadata(json),
        Err(ProposalError::MalformedInput(_))
    ));
}

#[test]
fn money_accepts_numbers_and_display_strings() {
    let json = r#"{"metadata": {"client_name": "Acme"},
        "investment": {"packages": [
            {"monthly_retainer": 1250.5, "ad_spend": "$12,000"}
        ]}}"#;
    let metadata = parse_metadata(json).expect("parses");
    let package = &metadata.investment.packages[0];
    assert_eq!(package.monthly_retainer, Some(Money::from_cents(125_050)));
    assert_eq!(package.ad_spend, Some(Money::from_dollars(12_000)));
}

#[test]
fn missing_client_name_fails_validation_only() {
    let metadata = parse_metadata(r#"{"metadata": {"analyst": "Jane"}}"#).expect("parses");
    match metadata.validate() {
        Err(ProposalError::MissingRequiredField { path }) => {
            assert_eq!(path, "metadata.client_name");
        }
        other => panic!("expected missing field, got {other:?}"),
    }
}

#[test]
fn blank_client_name_is_missing() {
    let metadata = parse_metadata(r#"{"metadata": {"client_name": "   "}}"#).expect("parses");
    assert!(matches!(
        metadata.validate(),
        Err(ProposalError::MissingRequiredField { .. })
    ));
}

#[test]
fn load_project_reads_metadata_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join(METADATA_FILE_NAME), TEMPLATE).expect("write metadata");
    let metadata = load_project(dir.path()).expect("loads");
    assert_eq!(metadata.client_name().expect("client"), "Client Name");
}

#[test]
fn load_project_reports_missing_file_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    match load_project(dir.path()) {
        Err(ProposalError::Io { path, .. }) => {
            assert!(path.ends_with(METADATA_FILE_NAME));
        }
        other => panic!("expected io error, got {other:?}"),
    }
}
