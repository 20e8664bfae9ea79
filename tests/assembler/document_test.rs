//! Whole-document guarantees.

use serde_json::json;

use proposal_generator::assembler::{assemble_document, render_fragments};
use proposal_generator::layout::{asset_allowed, external_references, Branding, Placeholder, Skeleton};
use proposal_generator::metadata::{parse_metadata, ClientMetadata};
use proposal_generator::render::SectionId;
use proposal_generator::{generate_proposal, ProposalError};

const TEMPLATE: &str = include_str!("../../templates/metadata_template.json");

fn template() -> ClientMetadata {
    parse_metadata(TEMPLATE).expect("template parses")
}

#[test]
fn no_placeholder_survives_composition() {
    let document = generate_proposal(&template(), &Branding::default()).expect("document");
    for placeholder in Placeholder::ALL {
        let braced = format!("{{{{{}}}}}", placeholder.token());
        assert!(!document.html().contains(&braced), "{braced} left in output");
    }
    assert!(!document.html().contains("{{"));
}

#[test]
fn generation_is_idempotent() {
    let metadata = template();
    let first = generate_proposal(&metadata, &Branding::default()).expect("first");
    let second = generate_proposal(&metadata, &Branding::default()).expect("second");
    assert_eq!(first, second);
}

#[test]
fn sections_and_nav_follow_fixed_order() {
    let document = generate_proposal(&template(), &Branding::default()).expect("document");
    let html = document.html();

    let mut last_section = 0usize;
    let mut last_link = 0usize;
    for section in SectionId::ALL {
        let at = html
            .find(&format!("<section id=\"{}\"", section.anchor()))
            .expect("section present");
        assert!(at >= last_section, "{section} out of order");
        last_section = at;

        let link = html
            .find(&format!("href=\"#{}\"", section.anchor()))
            .expect("nav link present");
        assert!(link >= last_link, "{section} link out of order");
        last_link = link;
    }
    assert_eq!(html.matches("<section id=").count(), SectionId::ALL.len());
}

#[test]
fn only_allow_listed_assets_are_referenced() {
    let mut metadata = template();
    metadata.metadata.client_name = Some("Acme <img src=\"https://evil.example/x.gif\">".to_owned());
    let document = generate_proposal(&metadata, &Branding::default()).expect("document");

    let references = external_references(document.html());
    assert!(!references.is_empty());
    for url in references {
        assert!(asset_allowed(&url), "unexpected external reference {url}");
    }
}

#[test]
fn document_is_self_contained() {
    let document = generate_proposal(&template(), &Branding::default()).expect("document");
    let html = document.html();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<style>"));
    assert!(!html.contains("<link rel=\"stylesheet\""));
    assert!(!html.contains("<script"));
}

#[test]
fn footer_year_comes_from_proposal_date() {
    let metadata: ClientMetadata = serde_json::from_value(json!({
        "metadata": {"client_name": "Acme", "proposal_date": "2031-06-01"}
    }))
    .expect("metadata");
    let branding = Branding {
        company_name: "Northwind Media".to_owned(),
        tagline: String::new(),
    };
    let document = generate_proposal(&metadata, &branding).expect("document");
    assert!(document.html().contains("&copy; 2031 Northwind Media."));
}

#[test]
fn missing_client_name_fails_the_run() {
    let metadata: ClientMetadata =
        serde_json::from_value(json!({"client_context": {"industry": "Retail"}})).expect("metadata");
    match generate_proposal(&metadata, &Branding::default()) {
        Err(ProposalError::MissingRequiredField { path }) => assert_eq!(path, "metadata.client_name"),
        other => panic!("expected missing field, got {other:?}"),
    }
}

#[test]
fn assembled_fragments_match_generate() {
    let metadata = template();
    let fragments = render_fragments(&metadata).expect("fragments");
    assert_eq!(fragments.len(), SectionId::ALL.len());
    let skeleton = Skeleton::embedded().expect("skeleton");
    let assembled =
        assemble_document(&metadata, &fragments, &skeleton, &Branding::default()).expect("assembled");
    let generated = generate_proposal(&metadata, &Branding::default()).expect("generated");
    assert_eq!(assembled, generated);
}
