//! Prompt text for drafted sections.

use serde::Serialize;

use crate::metadata::ClientMetadata;
use crate::render::assets::{GOOGLE_ADS_BADGE_URL, LOGO_URL};
use crate::render::SectionId;

use super::sanitize::{ALLOWED_CLASSES, ALLOWED_TAGS};

/// Style rules sent as the system prompt for every section.
pub fn system_prompt() -> String {
    format!(
        "You are writing HTML fragments for a digital marketing proposal.\n\
\n\
ALLOWED TAGS: {tags}\n\
ALLOWED CLASSES: {classes}\n\
\n\
ASSET URLS (the only images you may reference):\n\
- Google Ads badge: {GOOGLE_ADS_BADGE_URL}\n\
- Agency logo: {LOGO_URL}\n\
\n\
RULES:\n\
- No style attributes, no script or style elements, no event handlers, no links.\n\
- Do not invent classes beyond those listed.\n\
- Do not add the section heading; it is added for you.\n\
- Output only the HTML fragment. No explanations, comments or markdown code fences.\n\
- Use <ul class=\"checklist\"> for check-mark lists.\n\
- Wrap key deliverables in <div class=\"success-box\"> or <div class=\"info-box\">.\n\
- Professional, persuasive, client-focused tone. Respect the length budget.",
        tags = ALLOWED_TAGS.join(", "),
        classes = ALLOWED_CLASSES.join(", "),
    )
}

/// Default output token budget per section.
pub const fn max_tokens(section: SectionId) -> u32 {
    match section {
        SectionId::ExecutiveSummary | SectionId::Timeline => 1500,
        SectionId::NextSteps => 1000,
        SectionId::Understanding | SectionId::CompetitiveAnalysis => 2000,
        SectionId::SuccessMetrics | SectionId::Investment => 2500,
        SectionId::Approach => 4000,
    }
}

fn json_block<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_owned())
}

/// User prompt for one section, built from the metadata subtree it covers.
pub fn section_prompt(section: SectionId, metadata: &ClientMetadata, client: &str) -> String {
    let context = &metadata.client_context;
    match section {
        SectionId::ExecutiveSummary => format!(
            "Client: {client}\nIndustry: {}\nLocation: {}\nBrands: {}\n\
Enabled channels: {}\n\n\
Task: write the executive summary.\n\
1. An opening paragraph (3-4 sentences) positioning the client in their market.\n\
2. A success-box headed \"This Proposal Delivers:\" with 5-7 checklist items.\n\
3. An info-box with the expected outcome within 3-6 months.\n\
Length: at most 250 words.",
            context.industry(),
            context.location(),
            context.brands.join(", "),
            metadata
                .strategy
                .enabled_pillars()
                .map(|(key, _)| key)
                .collect::<Vec<_>>()
                .join(", ")
        ),
        SectionId::Understanding => format!(
            "Client: {client}\nCurrent situation:\n{}\nSuccess definition:\n{}\nTarget audience:\n{}\n\n\
Task: write the \"Understanding Your Business & Challenges\" section.\n\
1. <h3>Your Current Situation</h3> with a short paragraph.\n\
2. A warning-box listing the pain points.\n\
3. <h3>What Success Looks Like for {client}</h3> with short-term (3-6 months) and long-term (1-3 years) checklists.\n\
4. <h3>Your Target Audience</h3> as a card-grid of Demographics, Psychographics and Search Behavior cards.\n\
Length: at most 400 words.",
            json_block(&context.current_situation),
            json_block(&context.success_definition),
            json_block(&context.target_audience)
        ),
        SectionId::CompetitiveAnalysis => format!(
            "Competitive landscape:\n{}\n\n\
Task: write the competitive analysis.\n\
1. <h3>Market Landscape</h3> overview.\n\
2. <h3>Primary Competitors</h3> with strengths and weaknesses.\n\
3. <h3>Market Opportunities</h3> as a highlight-box of 3-5 points.\n\
Length: at most 400 words.",
            json_block(&metadata.competitive_landscape)
        ),
        SectionId::Approach => format!(
            "Strategy:\n{}\n\n\
Task: write the \"Our Approach\" section.\n\
1. <h3>Our Strategic Approach</h3> intro paragraph.\n\
2. One block per enabled pillar only, numbered in order, with tactics and expected results. \
Disabled pillars must not appear.\n\
3. If google_ads is enabled, include the platform badge using the Google Ads asset URL.\n\
4. <h3>Creative Asset Development</h3> covering the creative services.\n\
Length: at most 800 words.",
            json_block(&metadata.strategy)
        ),
        SectionId::SuccessMetrics => format!(
            "Success metrics:\n{}\n\n\
Task: write the \"Success Metrics & ROI\" section.\n\
1. <h3>Key Performance Indicators</h3>.\n\
2. <h3>Reporting Cadence</h3>.\n\
3. <h3>Performance Projections</h3> as a table.\n\
4. <h3>ROI Calculation Example</h3> in a success-box.\n\
Use the figures given; do not invent numbers. Length: at most 500 words.",
            json_block(&metadata.success_metrics)
        ),
        SectionId::Timeline => format!(
            "Timeline:\n{}\n\n\
Task: write the \"Implementation Timeline\" section. For each phase in order, an <h4> \
with the phase title followed by an info-box listing its deliverables.\n\
Length: at most 300 words.",
            json_block(&metadata.timeline)
        ),
        SectionId::Investment => format!(
            "Investment:\n{}\n\n\
Task: write the \"Investment\" section. For each package a price-box with the package name, \
the monthly total exactly as given, and what is included; then the payment terms.\n\
Do not change any amount. Length: at most 500 words.",
            json_block(&metadata.investment)
        ),
        SectionId::NextSteps => format!(
            "Contact:\n{}\nProcess:\n{}\n\n\
Task: write the \"Next Steps\" section.\n\
1. <h4>Getting Started</h4> as a numbered list.\n\
2. <h3>Ready to Transform Your Digital Marketing?</h3> with a short call to action.\n\
3. An info-box headed \"Questions or Ready to Proceed?\" with the contact details.\n\
Length: at most 200 words.",
            json_block(&metadata.next_steps.contact),
            json_block(&metadata.next_steps.process)
        ),
    }
}
