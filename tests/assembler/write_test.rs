//! Writing finished documents.

use std::fs;

use proposal_generator::assembler::write_document;
use proposal_generator::layout::Branding;
use proposal_generator::metadata::parse_metadata;
use proposal_generator::generate_proposal;

fn document() -> proposal_generator::ProposalDocument {
    let metadata = parse_metadata(r#"{"metadata": {"client_name": "Acme"}}"#).expect("metadata");
    generate_proposal(&metadata, &Branding::default()).expect("document")
}

#[test]
fn writes_complete_file_and_creates_parents() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("out/nested/Proposal.html");
    let document = document();

    write_document(&document, &path).expect("write");

    let written = fs::read_to_string(&path).expect("read back");
    assert_eq!(written, document.html());
    assert!(!dir.path().join("out/nested/Proposal.html.tmp").exists());
}

#[test]
fn overwrites_existing_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("Proposal.html");
    fs::write(&path, "stale").expect("seed");

    write_document(&document(), &path).expect("write");
    let written = fs::read_to_string(&path).expect("read back");
    assert!(written.starts_with("<!DOCTYPE html>"));
}

#[test]
fn failed_write_leaves_no_partial_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    // A directory in the way makes the final rename fail.
    let path = dir.path().join("Proposal.html");
    fs::create_dir_all(path.join("occupied")).expect("blocker");

    assert!(write_document(&document(), &path).is_err());
    assert!(!dir.path().join("Proposal.html.tmp").exists());
    assert!(path.is_dir());
}
