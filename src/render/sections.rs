//! The eight proposal sections.
//!
//! [`render_section`] is a pure function of the metadata: no section reads
//! the clock, the environment or any state outside its arguments.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ProposalError;
use crate::metadata::{ClientMetadata, Package, Pillar, SuccessMetrics};

use super::components::{
    call_out, card_grid, card_grid_from_lists, list, list_box, platform_badge, BoxKind, Card,
    Channel, IconSlot, ListStyle, PriceBox,
};
use super::format::{
    anchor_slug, format_currency, format_percent, format_rate, group_thousands, humanize_key,
    roi_basis_points,
};
use super::{escape, Markup};

/// Fixed proposal sections, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    /// Executive Summary.
    ExecutiveSummary,
    /// Understanding Your Business & Challenges.
    Understanding,
    /// Competitive Analysis.
    CompetitiveAnalysis,
    /// Our Approach / Strategy.
    Approach,
    /// Success Metrics & ROI.
    SuccessMetrics,
    /// Implementation Timeline.
    Timeline,
    /// Investment.
    Investment,
    /// Next Steps.
    NextSteps,
}

impl SectionId {
    /// All sections in document order.
    pub const ALL: [SectionId; 8] = [
        SectionId::ExecutiveSummary,
        SectionId::Understanding,
        SectionId::CompetitiveAnalysis,
        SectionId::Approach,
        SectionId::SuccessMetrics,
        SectionId::Timeline,
        SectionId::Investment,
        SectionId::NextSteps,
    ];

    /// Stable snake_case key.
    pub const fn key(self) -> &'static str {
        match self {
            Self::ExecutiveSummary => "executive_summary",
            Self::Understanding => "your_business",
            Self::CompetitiveAnalysis => "competitive_analysis",
            Self::Approach => "strategy",
            Self::SuccessMetrics => "success_metrics",
            Self::Timeline => "timeline",
            Self::Investment => "investment",
            Self::NextSteps => "next_steps",
        }
    }

    /// Stable anchor id used by the navigation menu.
    pub const fn anchor(self) -> &'static str {
        match self {
            Self::ExecutiveSummary => "executive-summary",
            Self::Understanding => "your-business",
            Self::CompetitiveAnalysis => "competitive-analysis",
            Self::Approach => "our-approach",
            Self::SuccessMetrics => "success-metrics",
            Self::Timeline => "timeline",
            Self::Investment => "investment",
            Self::NextSteps => "next-steps",
        }
    }

    /// Section heading.
    pub const fn title(self) -> &'static str {
        match self {
            Self::ExecutiveSummary => "Executive Summary",
            Self::Understanding => "Understanding Your Business & Challenges",
            Self::CompetitiveAnalysis => "Competitive Analysis",
            Self::Approach => "Our Approach",
            Self::SuccessMetrics => "Success Metrics & ROI",
            Self::Timeline => "Implementation Timeline",
            Self::Investment => "Investment",
            Self::NextSteps => "Next Steps",
        }
    }

    /// Parse a section key as produced by [`SectionId::key`].
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|section| section.key() == key)
    }
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Rendered HTML for one section, before composition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Section the fragment belongs to.
    pub section: SectionId,
    /// Section body markup (without the section wrapper and heading).
    pub html: Markup,
}

/// Render one section from the metadata.
///
/// # Errors
///
/// Returns [`ProposalError::MissingRequiredField`] when `metadata.client_name`
/// is absent. Every other gap degrades to its default.
pub fn render_section(
    section: SectionId,
    metadata: &ClientMetadata,
) -> Result<Fragment, ProposalError> {
    let client = metadata.client_name()?;
    let mut html = match section {
        SectionId::ExecutiveSummary => executive_summary(client, metadata),
        SectionId::Understanding => understanding(client, metadata),
        SectionId::CompetitiveAnalysis => competitive_analysis(metadata),
        SectionId::Approach => approach(client, metadata),
        SectionId::SuccessMetrics => success_metrics(&metadata.success_metrics),
        SectionId::Timeline => timeline(metadata),
        SectionId::Investment => investment(metadata),
        SectionId::NextSteps => next_steps(metadata),
    };
    if html.is_empty() {
        html.raw("<p class=\"section-pending\">Details for this section will be confirmed during discovery.</p>");
    }
    Ok(Fragment { section, html })
}

fn heading(level: u8, text: &str) -> Markup {
    let mut markup = Markup::new();
    markup
        .raw(&format!("<h{level}>"))
        .text(text)
        .raw(&format!("</h{level}>"));
    markup
}

fn paragraph(text: &str) -> Markup {
    let mut markup = Markup::new();
    markup.raw("<p>").text(text).raw("</p>");
    markup
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|text| !text.is_empty())
}

fn executive_summary(client: &str, metadata: &ClientMetadata) -> Markup {
    let context = &metadata.client_context;
    let mut html = Markup::new();

    html.raw("<p>This proposal sets out a digital marketing plan for <strong>")
        .text(client)
        .raw("</strong>");
    if let Some(industry) = non_blank(&context.industry) {
        html.raw(" in the ").text(industry).raw(" sector");
    }
    if let Some(location) = non_blank(&context.location) {
        html.raw(", serving ").text(location);
    }
    html.raw(". It covers where the business stands today, the channels we will run, how success is measured and what it costs.</p>");

    if !context.brands.is_empty() {
        html.raw("<p><strong>Brands covered:</strong> ")
            .text(&context.brands.join(", "))
            .raw("</p>");
    }

    let mut deliverables: Vec<String> = metadata
        .strategy
        .enabled_pillars()
        .map(|(key, _)| format!("{} strategy and management", Channel::from_key(key).display_name()))
        .collect();
    if !metadata.strategy.creative_services.is_empty() {
        deliverables.push("Creative asset development".to_owned());
    }
    if !metadata.success_metrics.primary_kpis.is_empty() {
        deliverables.push("Transparent KPI reporting and ROI tracking".to_owned());
    }
    html.push_opt(
        list_box(
            BoxKind::Success,
            Some("This Proposal Delivers:"),
            &deliverables,
            ListStyle::Checklist,
        )
        .as_ref(),
    );

    html.push_opt(
        list_box(
            BoxKind::Info,
            Some("Expected Outcome (3-6 Months):"),
            &context.success_definition.short_term,
            ListStyle::Checklist,
        )
        .as_ref(),
    );
    html
}

fn understanding(client: &str, metadata: &ClientMetadata) -> Markup {
    let context = &metadata.client_context;
    let situation = &context.current_situation;
    let mut html = Markup::new();

    let description = non_blank(&situation.description);
    if description.is_some() || !situation.pain_points.is_empty() {
        html.push(&heading(3, "Your Current Situation"));
        if let Some(description) = description {
            html.push(&paragraph(description));
        }
        html.push_opt(
            list_box(
                BoxKind::Warning,
                Some("Pain Points:"),
                &situation.pain_points,
                ListStyle::Bullets,
            )
            .as_ref(),
        );
    }

    let goals = &context.success_definition;
    if !goals.short_term.is_empty() || !goals.long_term.is_empty() {
        html.push(&heading(3, &format!("What Success Looks Like for {client}")));
        html.push_opt(
            card_grid_from_lists(&[
                (
                    "Short-Term Success (3-6 Months)",
                    IconSlot::ShortTerm,
                    &goals.short_term,
                ),
                (
                    "Long-Term Success (1-3 Years)",
                    IconSlot::LongTerm,
                    &goals.long_term,
                ),
            ])
            .as_ref(),
        );
    }

    // Cards follow the audience categories, not whether their lists are filled.
    if let Some(audience) = &context.target_audience {
        html.push(&heading(3, "Your Target Audience"));
        html.push_opt(
            card_grid_from_lists(&[
                ("Demographics", IconSlot::Demographics, &audience.demographics),
                (
                    "Psychographics",
                    IconSlot::Psychographics,
                    &audience.psychographics,
                ),
                ("Search Behavior", IconSlot::Behaviors, &audience.behaviors),
            ])
            .as_ref(),
        );
    }
    html
}

fn competitive_analysis(metadata: &ClientMetadata) -> Markup {
    let landscape = &metadata.competitive_landscape;
    let mut html = Markup::new();

    if let Some(overview) = non_blank(&landscape.market_overview) {
        html.push(&heading(3, "Market Landscape"));
        html.push(&paragraph(overview));
    }

    let cards: Vec<Card> = landscape
        .competitors
        .iter()
        .map(|competitor| {
            let mut body = Markup::new();
            if let Some(strengths) = list(&competitor.strengths, ListStyle::Bullets) {
                body.raw("<p class=\"card-label\">Strengths</p>").push(&strengths);
            }
            if let Some(weaknesses) = list(&competitor.weaknesses, ListStyle::Bullets) {
                body.raw("<p class=\"card-label\">Weaknesses</p>").push(&weaknesses);
            }
            let name = if competitor.name.trim().is_empty() {
                "Competitor"
            } else {
                competitor.name.trim()
            };
            Card {
                title: name.to_owned(),
                icon: IconSlot::Competitor,
                body,
            }
        })
        .collect();
    if let Some(grid) = card_grid(&cards) {
        html.push(&heading(3, "Primary Competitors"));
        html.push(&grid);
    }

    if let Some(opportunities) = list_box(
        BoxKind::Highlight,
        Some("Where We Will Win:"),
        &landscape.opportunities,
        ListStyle::Checklist,
    ) {
        html.push(&heading(3, "Market Opportunities"));
        html.push(&opportunities);
    }
    html
}

fn approach(client: &str, metadata: &ClientMetadata) -> Markup {
    let strategy = &metadata.strategy;
    let mut html = Markup::new();

    let names: Vec<String> = strategy
        .enabled_pillars()
        .map(|(key, _)| Channel::from_key(key).display_name())
        .collect();
    if !names.is_empty() {
        html.push(&heading(3, "Our Strategic Approach"));
        html.push(&paragraph(&format!(
            "We will run {} coordinated {} for {client}: {}.",
            names.len(),
            if names.len() == 1 { "channel" } else { "channels" },
            join_names(&names)
        )));
    }

    let mut ids = HashSet::new();
    for (position, (key, pillar)) in strategy.enabled_pillars().enumerate() {
        let id = unique_id(format!("pillar-{}", anchor_slug(key)), &mut ids);
        html.push(&pillar_block(position.saturating_add(1), &id, key, pillar));
    }

    let creative: Vec<Card> = strategy
        .creative_services
        .iter()
        .map(|(category, services)| {
            Card::with_items(humanize_key(category), IconSlot::Creative, services)
        })
        .collect();
    if let Some(grid) = card_grid(&creative) {
        html.push(&heading(3, "Creative Asset Development"));
        html.push(&grid);
    }
    html
}

/// `base`, or `base-N` for the first N >= 2 not yet taken. Records the result.
fn unique_id(base: String, taken: &mut HashSet<String>) -> String {
    let mut id = base.clone();
    let mut suffix = 2usize;
    while taken.contains(&id) {
        id = format!("{base}-{suffix}");
        suffix = suffix.saturating_add(1);
    }
    taken.insert(id.clone());
    id
}

fn pillar_block(number: usize, id: &str, key: &str, pillar: &Pillar) -> Markup {
    let channel = Channel::from_key(key);
    let mut html = Markup::new();
    html.raw(&format!(
        "<div class=\"platform-block\" id=\"{}\" data-channel=\"{}\">",
        escape(id),
        escape(key)
    ));
    html.push_opt(platform_badge(&channel).as_ref());
    html.push(&heading(
        3,
        &format!("{number}. {} Strategy", channel.display_name()),
    ));

    if let Some(budget) = pillar.monthly_budget {
        html.raw("<p class=\"pillar-budget\">Monthly budget: <strong>")
            .text(&format_currency(budget))
            .raw("</strong></p>");
    }
    if let Some(fee) = pillar.monthly_fee {
        html.raw("<p class=\"pillar-budget\">Monthly management fee: <strong>")
            .text(&format_currency(fee))
            .raw("</strong></p>");
    }
    if !pillar.platforms.is_empty() {
        html.raw("<p><strong>Platforms:</strong> ")
            .text(&pillar.platforms.join(", "))
            .raw("</p>");
    }
    if let Some(tactics) = list(&pillar.tactics, ListStyle::Bullets) {
        html.push(&heading(4, "Tactics"));
        html.push(&tactics);
    }
    html.push_opt(
        list_box(
            BoxKind::Success,
            Some("Expected Results:"),
            &pillar.expected_results,
            ListStyle::Checklist,
        )
        .as_ref(),
    );
    html.raw("</div>");
    html
}

fn join_names(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [only] => only.clone(),
        [head @ .., last] => format!("{} and {last}", head.join(", ")),
    }
}

fn success_metrics(metrics: &SuccessMetrics) -> Markup {
    let mut html = Markup::new();

    if let Some(kpis) = list(&metrics.primary_kpis, ListStyle::Checklist) {
        html.push(&heading(3, "Key Performance Indicators"));
        html.push(&kpis);
    }

    let mut cadence = Vec::new();
    if metrics.reporting.weekly {
        cadence.push("Weekly performance snapshot".to_owned());
    }
    if metrics.reporting.monthly {
        cadence.push("Monthly performance report with insights and recommendations".to_owned());
    }
    if metrics.reporting.quarterly {
        cadence.push("Quarterly business review".to_owned());
    }
    if let Some(reporting) = list_box(BoxKind::Info, None, &cadence, ListStyle::Bullets) {
        html.push(&heading(3, "Reporting Cadence"));
        html.push(&reporting);
    }

    if !metrics.projections.is_empty() {
        html.push(&heading(3, "Performance Projections"));
        html.raw("<table class=\"projection-table\"><thead><tr><th>Period</th><th>Leads</th><th>Cost per Lead</th><th>Conversion Rate</th><th>Revenue</th></tr></thead><tbody>");
        for (period, row) in &metrics.projections {
            let label = non_blank(&row.label)
                .map(str::to_owned)
                .unwrap_or_else(|| humanize_key(period));
            let leads = row.leads.map(group_thousands);
            let cost = row.cost_per_lead.map(format_currency);
            let rate = non_blank(&row.conversion_rate).map(format_rate);
            let revenue = row.revenue.map(format_currency);
            html.raw("<tr>");
            for cell in [Some(label), leads, cost, rate, revenue] {
                html.raw("<td>")
                    .text(cell.as_deref().unwrap_or(crate::metadata::NOT_AVAILABLE))
                    .raw("</td>");
            }
            html.raw("</tr>");
        }
        html.raw("</tbody></table>");
    }

    if let Some(roi) = &metrics.roi_example {
        let mut body = Markup::new();
        if let Some(description) = non_blank(&roi.description) {
            body.push(&paragraph(description));
        }
        let mut lines = Vec::new();
        if let Some(investment) = roi.investment {
            lines.push(format!("Investment: {}", format_currency(investment)));
        }
        if let Some(revenue) = roi.revenue {
            lines.push(format!("Attributed revenue: {}", format_currency(revenue)));
        }
        if let (Some(investment), Some(revenue)) = (roi.investment, roi.revenue) {
            if let Some(basis_points) = roi_basis_points(investment, revenue) {
                lines.push(format!("Return on investment: {}", format_percent(basis_points)));
            }
        }
        body.push_opt(list(&lines, ListStyle::Bullets).as_ref());
        if !body.is_empty() {
            html.push(&heading(3, "ROI Calculation Example"));
            html.push(&call_out(BoxKind::Success, None, &body));
        }
    }
    html
}

fn timeline(metadata: &ClientMetadata) -> Markup {
    let mut html = Markup::new();
    for (period, phase) in &metadata.timeline {
        let title = non_blank(&phase.title)
            .map(str::to_owned)
            .unwrap_or_else(|| humanize_key(period));
        html.raw("<div class=\"timeline-phase\">");
        html.push(&heading(4, &title));
        html.push_opt(
            list_box(
                BoxKind::Info,
                None,
                &phase.deliverables,
                ListStyle::Bullets,
            )
            .as_ref(),
        );
        html.raw("</div>");
    }
    html
}

fn investment(metadata: &ClientMetadata) -> Markup {
    let investment = &metadata.investment;
    let mut html = Markup::new();
    for package in &investment.packages {
        html.push(&package_block(package));
    }
    if let Some(terms) = list(&investment.payment_terms, ListStyle::Bullets) {
        html.push(&heading(3, "Payment Terms"));
        html.push(&terms);
    }
    html
}

fn package_block(package: &Package) -> Markup {
    let mut html = Markup::new();
    html.raw("<div class=\"package\">");
    match package.total_monthly() {
        Some(total) => {
            let mut lines = Vec::new();
            if let Some(retainer) = package.monthly_retainer {
                lines.push(("Monthly retainer", retainer));
            }
            if let Some(spend) = package.ad_spend {
                lines.push(("Monthly ad spend", spend));
            }
            let price = PriceBox {
                name: package.name(),
                lines,
                total,
                recommended: package.recommended,
            };
            html.push(&price.render());
        }
        None => {
            html.push(&heading(3, package.name()));
        }
    }
    if let Some(description) = non_blank(&package.description) {
        html.push(&paragraph(description));
    }
    html.push_opt(list(&package.includes, ListStyle::Checklist).as_ref());
    html.raw("</div>");
    html
}

fn next_steps(metadata: &ClientMetadata) -> Markup {
    let steps = &metadata.next_steps;
    let contact = &steps.contact;
    let mut html = Markup::new();

    if let Some(process) = list(&steps.process, ListStyle::Numbered) {
        html.push(&heading(4, "Getting Started"));
        html.push(&process);
    }

    html.push(&heading(3, "Ready to Transform Your Digital Marketing?"));
    html.push(&paragraph(
        "Approve this proposal and we will schedule a kickoff call within two business days.",
    ));

    let mut card = Markup::new();
    for (label, value) in [
        ("Contact", contact.name()),
        ("Email", contact.email()),
        ("Phone", contact.phone()),
        ("Website", contact.website()),
    ] {
        card.raw("<p><strong>")
            .text(label)
            .raw(":</strong> ")
            .text(value)
            .raw("</p>");
    }
    html.push(&call_out(
        BoxKind::Info,
        Some("Questions or Ready to Proceed?"),
        &card,
    ));
    html
}
