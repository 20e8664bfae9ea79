//! Prompt construction.

use proposal_generator::drafting::prompts::{section_prompt, system_prompt};
use proposal_generator::drafting::sanitize::{ALLOWED_CLASSES, ALLOWED_TAGS};
use proposal_generator::metadata::parse_metadata;
use proposal_generator::render::assets::GOOGLE_ADS_BADGE_URL;
use proposal_generator::render::SectionId;

#[test]
fn system_prompt_names_allowed_assets() {
    let prompt = system_prompt();
    assert!(prompt.contains(GOOGLE_ADS_BADGE_URL));
    assert!(prompt.contains("No style attributes"));
}

#[test]
fn system_prompt_offers_exactly_what_survives_cleanup() {
    let prompt = system_prompt();
    assert!(prompt.contains(&format!("ALLOWED TAGS: {}\n", ALLOWED_TAGS.join(", "))));
    assert!(prompt.contains(&format!(
        "ALLOWED CLASSES: {}\n",
        ALLOWED_CLASSES.join(", ")
    )));
}

#[test]
fn section_prompts_carry_their_subtree() {
    let metadata = parse_metadata(
        r#"{"metadata": {"client_name": "Acme"},
            "investment": {"packages": [{"name": "Growth Plan", "monthly_retainer": 5000}]},
            "timeline": {"week_1": {"title": "Kickoff"}}}"#,
    )
    .expect("metadata");

    let investment = section_prompt(SectionId::Investment, &metadata, "Acme");
    assert!(investment.contains("Growth Plan"));
    assert!(!investment.contains("Kickoff"));

    let timeline = section_prompt(SectionId::Timeline, &metadata, "Acme");
    assert!(timeline.contains("Kickoff"));
}
