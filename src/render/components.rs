//! Reusable visual components.
//!
//! Every component that paints a background takes its classes from
//! [`Component::classes`], so the text colour cannot be chosen per call.

use crate::metadata::Money;

use super::assets::GOOGLE_ADS_BADGE_URL;
use super::format::{format_currency, humanize_key};
use super::palette::Component;
use super::{escape, Markup};

/// List presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStyle {
    /// Plain bullets.
    Bullets,
    /// Check-mark bullets.
    Checklist,
    /// Numbered steps.
    Numbered,
}

/// Render items as a list, preserving order.
///
/// Returns `None` for an empty sequence so no empty container is emitted.
pub fn list(items: &[String], style: ListStyle) -> Option<Markup> {
    if items.is_empty() {
        return None;
    }
    let (open, close) = match style {
        ListStyle::Bullets => ("<ul>", "</ul>"),
        ListStyle::Checklist => ("<ul class=\"checklist\">", "</ul>"),
        ListStyle::Numbered => ("<ol>", "</ol>"),
    };
    let mut markup = Markup::new();
    markup.raw(open);
    for item in items {
        markup.raw("<li>").text(item).raw("</li>");
    }
    markup.raw(close);
    Some(markup)
}

/// Tinted call-out box variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxKind {
    /// Neutral information.
    Info,
    /// Problems and risks.
    Warning,
    /// Outcomes and commitments.
    Success,
    /// Opportunities worth calling out.
    Highlight,
}

impl BoxKind {
    /// Palette component for this box.
    pub const fn component(self) -> Component {
        match self {
            Self::Info => Component::InfoBox,
            Self::Warning => Component::WarningBox,
            Self::Success => Component::SuccessBox,
            Self::Highlight => Component::HighlightBox,
        }
    }
}

/// Wrap a body in a call-out box with an optional heading.
pub fn call_out(kind: BoxKind, heading: Option<&str>, body: &Markup) -> Markup {
    let mut markup = Markup::new();
    markup.raw(&format!("<div class=\"{}\">", kind.component().classes()));
    if let Some(heading) = heading {
        markup.raw("<h4>").text(heading).raw("</h4>");
    }
    markup.push(body).raw("</div>");
    markup
}

/// Call-out box around a list; `None` when the list is empty.
pub fn list_box(
    kind: BoxKind,
    heading: Option<&str>,
    items: &[String],
    style: ListStyle,
) -> Option<Markup> {
    list(items, style).map(|body| call_out(kind, heading, &body))
}

/// Fixed semantic slots that carry an icon. Icons are never client supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconSlot {
    /// Audience demographics.
    Demographics,
    /// Audience values and motivations.
    Psychographics,
    /// Audience search behaviour.
    Behaviors,
    /// Short-term goals.
    ShortTerm,
    /// Long-term goals.
    LongTerm,
    /// Competitor entry.
    Competitor,
    /// Creative service category.
    Creative,
    /// Key performance indicators.
    Kpi,
    /// Reporting cadence.
    Reporting,
    /// Contact details.
    Contact,
}

impl IconSlot {
    /// Glyph shown in the card header.
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Demographics => "\u{1F465}",
            Self::Psychographics => "\u{1F9E0}",
            Self::Behaviors => "\u{1F50D}",
            Self::ShortTerm => "\u{26A1}",
            Self::LongTerm => "\u{1F3C6}",
            Self::Competitor => "\u{1F3C1}",
            Self::Creative => "\u{1F3A8}",
            Self::Kpi => "\u{1F4C8}",
            Self::Reporting => "\u{1F4C5}",
            Self::Contact => "\u{2709}",
        }
    }
}

/// One card in a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// Card heading.
    pub title: String,
    /// Header icon slot.
    pub icon: IconSlot,
    /// Card body; may be empty.
    pub body: Markup,
}

impl Card {
    /// Card whose body is a bullet list of `items` (no list when empty).
    pub fn with_items(title: impl Into<String>, icon: IconSlot, items: &[String]) -> Self {
        Self {
            title: title.into(),
            icon,
            body: list(items, ListStyle::Bullets).unwrap_or_default(),
        }
    }

    /// Render the card.
    pub fn render(&self) -> Markup {
        let mut markup = Markup::new();
        markup.raw(&format!("<div class=\"{}\">", Component::Card.classes()));
        markup
            .raw("<div class=\"card-header\"><span class=\"section-icon\">")
            .raw(self.icon.glyph())
            .raw("</span><h4>")
            .text(&self.title)
            .raw("</h4></div>");
        markup.push(&self.body).raw("</div>");
        markup
    }
}

/// Lay cards out in a responsive grid, preserving order.
///
/// Returns `None` when there are no cards.
pub fn card_grid(cards: &[Card]) -> Option<Markup> {
    if cards.is_empty() {
        return None;
    }
    let mut markup = Markup::new();
    markup.raw("<div class=\"card-grid\">");
    for card in cards {
        markup.push(&card.render());
    }
    markup.raw("</div>");
    Some(markup)
}

/// Build a grid from `(title, icon, items)` triples.
pub fn card_grid_from_lists(entries: &[(&str, IconSlot, &[String])]) -> Option<Markup> {
    let cards: Vec<Card> = entries
        .iter()
        .map(|(title, icon, items)| Card::with_items(*title, *icon, items))
        .collect();
    card_grid(&cards)
}

/// Price-box content for one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceBox<'a> {
    /// Package name.
    pub name: &'a str,
    /// Labelled line items.
    pub lines: Vec<(&'a str, Money)>,
    /// Monthly total.
    pub total: Money,
    /// Mark as the recommended package.
    pub recommended: bool,
}

impl PriceBox<'_> {
    /// Render the price box.
    pub fn render(&self) -> Markup {
        let mut markup = Markup::new();
        markup.raw(&format!(
            "<div class=\"{}\">",
            Component::PriceBox.classes()
        ));
        if self.recommended {
            markup.raw("<span class=\"price-flag\">Recommended</span>");
        }
        markup.raw("<h3>").text(self.name).raw("</h3>");
        if !self.lines.is_empty() {
            markup.raw("<ul class=\"price-lines\">");
            for (label, amount) in &self.lines {
                markup
                    .raw("<li><span>")
                    .text(label)
                    .raw("</span><strong>")
                    .text(&format_currency(*amount))
                    .raw("</strong></li>");
            }
            markup.raw("</ul>");
        }
        markup
            .raw("<p class=\"price-total\">")
            .text(&format_currency(self.total))
            .raw("<span>/month</span></p>");
        markup.raw("</div>");
        markup
    }
}

/// A marketing channel key resolved against the known channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Channel {
    /// `google_ads`
    GoogleAds,
    /// `seo`
    Seo,
    /// `paid_social`
    PaidSocial,
    /// Any other key.
    Other(String),
}

impl Channel {
    /// Resolve a pillar key.
    pub fn from_key(key: &str) -> Self {
        match key {
            "google_ads" => Self::GoogleAds,
            "seo" => Self::Seo,
            "paid_social" => Self::PaidSocial,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Heading name for the channel.
    pub fn display_name(&self) -> String {
        match self {
            Self::GoogleAds => "Google Ads".to_owned(),
            Self::Seo => "SEO".to_owned(),
            Self::PaidSocial => "Paid Social".to_owned(),
            Self::Other(key) => humanize_key(key),
        }
    }

    /// Constant badge asset for recognized platforms.
    pub fn badge_asset(&self) -> Option<&'static str> {
        match self {
            Self::GoogleAds => Some(GOOGLE_ADS_BADGE_URL),
            Self::Seo | Self::PaidSocial | Self::Other(_) => None,
        }
    }
}

/// Platform badge for channels with a known asset; `None` otherwise.
pub fn platform_badge(channel: &Channel) -> Option<Markup> {
    let url = channel.badge_asset()?;
    let name = channel.display_name();
    let mut markup = Markup::new();
    markup.raw(&format!(
        "<div class=\"platform-logo-section\"><div class=\"{}\">",
        Component::PlatformBadge.classes()
    ));
    markup.raw(&format!(
        "<img src=\"{}\" alt=\"{}\" class=\"platform-logo\">",
        escape(url),
        escape(&name)
    ));
    markup
        .raw("<span class=\"platform-badge-text\">Powered by ")
        .text(&name)
        .raw("</span></div></div>");
    Some(markup)
}
