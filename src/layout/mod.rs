//! Layout compositor: master skeleton, cover, navigation and footer.
//!
//! The skeleton is tokenized once into literal text and typed placeholder
//! slots. Composition walks the segments and fills each slot by matching on
//! [`Placeholder`], so inserted content is never searched for tokens again and
//! no replacement can be partial.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{PlaceholderProblem, ProposalError};
use crate::metadata::ClientMetadata;
use crate::render::assets::{is_allowed_asset, LOGO_URL};
use crate::render::palette::Component;
use crate::render::{escape, Fragment, Markup, SectionId};

/// Master layout shipped with the binary.
pub const EMBEDDED_SKELETON: &str = include_str!("../../templates/skeleton.html");

/// Base stylesheet shipped with the binary.
pub const BASE_STYLESHEET: &str = include_str!("../../templates/proposal.css");

/// Named slots in the master layout, written `{{NAME}}` in the skeleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    /// Document `<title>` text.
    Title,
    /// Embedded stylesheet.
    Stylesheet,
    /// Cover block.
    Cover,
    /// Navigation menu.
    Nav,
    /// The eight proposal sections.
    Sections,
    /// Footer block.
    Footer,
}

impl Placeholder {
    /// Every placeholder a skeleton must contain.
    pub const ALL: [Placeholder; 6] = [
        Placeholder::Title,
        Placeholder::Stylesheet,
        Placeholder::Cover,
        Placeholder::Nav,
        Placeholder::Sections,
        Placeholder::Footer,
    ];

    /// Token name between the braces.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Title => "TITLE",
            Self::Stylesheet => "STYLESHEET",
            Self::Cover => "COVER",
            Self::Nav => "NAV",
            Self::Sections => "SECTIONS",
            Self::Footer => "FOOTER",
        }
    }

    /// Resolve a token name.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.token() == token)
    }

    const fn index(self) -> usize {
        match self {
            Self::Title => 0,
            Self::Stylesheet => 1,
            Self::Cover => 2,
            Self::Nav => 3,
            Self::Sections => 4,
            Self::Footer => 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Slot(Placeholder),
}

/// A parsed master layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skeleton {
    segments: Vec<Segment>,
}

impl Skeleton {
    /// Tokenize a skeleton and check every placeholder occurs exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`ProposalError::TemplateIntegrity`] for a missing, duplicated,
    /// unknown or unterminated placeholder.
    pub fn parse(source: &str) -> Result<Self, ProposalError> {
        let mut segments = Vec::new();
        let mut seen = [false; Placeholder::ALL.len()];
        let mut rest = source;

        while let Some((before, after)) = rest.split_once("{{") {
            if !before.is_empty() {
                segments.push(Segment::Text(before.to_owned()));
            }
            let Some((name, tail)) = after.split_once("}}") else {
                return Err(integrity(
                    after.chars().take(24).collect::<String>(),
                    PlaceholderProblem::Unknown,
                ));
            };
            let name = name.trim();
            let placeholder = Placeholder::from_token(name)
                .ok_or_else(|| integrity(name, PlaceholderProblem::Unknown))?;
            let slot = seen
                .get_mut(placeholder.index())
                .ok_or_else(|| integrity(name, PlaceholderProblem::Unknown))?;
            if *slot {
                return Err(integrity(name, PlaceholderProblem::Duplicated));
            }
            *slot = true;
            segments.push(Segment::Slot(placeholder));
            rest = tail;
        }
        if !rest.is_empty() {
            segments.push(Segment::Text(rest.to_owned()));
        }

        for placeholder in Placeholder::ALL {
            if !seen.get(placeholder.index()).copied().unwrap_or(false) {
                return Err(integrity(placeholder.token(), PlaceholderProblem::Missing));
            }
        }
        Ok(Self { segments })
    }

    /// The skeleton shipped with the binary.
    ///
    /// # Errors
    ///
    /// Returns [`ProposalError::TemplateIntegrity`] if the packaged skeleton is defective.
    pub fn embedded() -> Result<Self, ProposalError> {
        Self::parse(EMBEDDED_SKELETON)
    }

    /// Placeholders in document order.
    pub fn placeholders(&self) -> impl Iterator<Item = Placeholder> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Slot(placeholder) => Some(*placeholder),
            Segment::Text(_) => None,
        })
    }
}

fn integrity(token: impl Into<String>, problem: PlaceholderProblem) -> ProposalError {
    ProposalError::TemplateIntegrity {
        token: token.into(),
        problem,
    }
}

/// Content for every placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentParts {
    /// Escaped `<title>` text.
    pub title: Markup,
    /// Complete stylesheet, inserted inside `<style>`.
    pub stylesheet: String,
    /// Cover block.
    pub cover: Markup,
    /// Navigation menu.
    pub nav: Markup,
    /// All sections.
    pub sections: Markup,
    /// Footer block.
    pub footer: Markup,
}

/// Fill every slot of `skeleton` from `parts`.
pub fn compose(skeleton: &Skeleton, parts: &DocumentParts) -> String {
    let mut out = String::with_capacity(
        parts
            .sections
            .as_str()
            .len()
            .saturating_add(parts.stylesheet.len())
            .saturating_add(4096),
    );
    for segment in &skeleton.segments {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Slot(placeholder) => out.push_str(match placeholder {
                Placeholder::Title => parts.title.as_str(),
                Placeholder::Stylesheet => &parts.stylesheet,
                Placeholder::Cover => parts.cover.as_str(),
                Placeholder::Nav => parts.nav.as_str(),
                Placeholder::Sections => parts.sections.as_str(),
                Placeholder::Footer => parts.footer.as_str(),
            }),
        }
    }
    out
}

/// Company details printed on the cover and footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Branding {
    /// Agency name.
    pub company_name: String,
    /// Footer strapline.
    pub tagline: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            company_name: "Mediaforce Digital".to_owned(),
            tagline: "Data-driven digital marketing".to_owned(),
        }
    }
}

/// Base stylesheet followed by the palette contrast rules.
pub fn stylesheet() -> String {
    let mut css = String::from(BASE_STYLESHEET);
    if !css.ends_with('\n') {
        css.push('\n');
    }
    css.push_str(&crate::render::palette::contrast_rules());
    css
}

/// `<title>` text: client and proposal type.
///
/// # Errors
///
/// Returns [`ProposalError::MissingRequiredField`] without a client name.
pub fn document_title(metadata: &ClientMetadata) -> Result<Markup, ProposalError> {
    let client = metadata.client_name()?;
    let mut title = Markup::new();
    title
        .text(client)
        .raw(" | ")
        .text(metadata.metadata.proposal_type());
    Ok(title)
}

/// Navigation menu with one anchor per section, in order.
pub fn build_nav(sections: impl IntoIterator<Item = SectionId>) -> Markup {
    let mut nav = Markup::new();
    nav.raw(&format!(
        "<nav class=\"{}\"><ul>",
        Component::Nav.classes()
    ));
    for section in sections {
        nav.raw(&format!("<li><a href=\"#{}\">", section.anchor()))
            .text(section.title())
            .raw("</a></li>");
    }
    nav.raw("</ul></nav>");
    nav
}

/// Wrap each fragment in its anchored `<section>` with its heading.
pub fn render_body(fragments: &[Fragment]) -> Markup {
    let mut body = Markup::new();
    for fragment in fragments {
        let section = fragment.section;
        body.raw(&format!(
            "<section id=\"{}\" class=\"section\">",
            section.anchor()
        ))
        .raw("<h2>")
        .text(section.title())
        .raw("</h2>")
        .push(&fragment.html)
        .raw("</section>\n");
    }
    body
}

/// Cover block on the dark surface.
///
/// # Errors
///
/// Returns [`ProposalError::MissingRequiredField`] without a client name.
pub fn render_cover(metadata: &ClientMetadata, branding: &Branding) -> Result<Markup, ProposalError> {
    let client = metadata.client_name()?;
    let info = &metadata.metadata;
    let mut cover = Markup::new();
    cover
        .raw(&format!(
            "<header class=\"{}\">",
            Component::Cover.classes()
        ))
        .raw(&format!(
            "<img src=\"{}\" alt=\"{}\" class=\"cover-logo\">",
            escape(LOGO_URL),
            escape(&branding.company_name)
        ))
        .raw("<p class=\"proposal-type\">")
        .text(info.proposal_type())
        .raw("</p><h1>")
        .text(client)
        .raw("</h1><p class=\"cover-meta\">Prepared by ")
        .text(info.analyst())
        .raw(" &middot; ")
        .text(info.proposal_date())
        .raw("</p></header>");
    Ok(cover)
}

/// Footer block. The year comes from `proposal_date` so repeated runs match.
pub fn render_footer(metadata: &ClientMetadata, branding: &Branding) -> Markup {
    let year = metadata
        .metadata
        .proposal_date
        .as_deref()
        .and_then(|date| NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok())
        .map(|date| date.year());

    let mut footer = Markup::new();
    footer
        .raw(&format!(
            "<footer class=\"{}\"><p>&copy; ",
            Component::Footer.classes()
        ));
    if let Some(year) = year {
        footer.text(&year.to_string()).raw(" ");
    }
    footer.text(&branding.company_name).raw(". ");
    if !branding.tagline.trim().is_empty() {
        footer.text(branding.tagline.trim());
    }
    footer.raw("</p>");
    if let Ok(client) = metadata.client_name() {
        footer
            .raw("<p class=\"confidential\">Prepared exclusively for ")
            .text(client)
            .raw(". Confidential.</p>");
    }
    footer.raw("</footer>");
    footer
}

static EXTERNAL_REFERENCE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)\b(?:src|href|srcset|data|poster|action|formaction|background)\s*=\s*["']?((?:https?:)?//[^"'\s>]+)"#,
    )
    .ok()
});

/// Whether `url` is on the fixed asset allow-list.
pub fn asset_allowed(url: &str) -> bool {
    is_allowed_asset(url)
}

/// External URLs referenced through URL-bearing attributes, in order.
pub fn external_references(html: &str) -> Vec<String> {
    let Some(pattern) = EXTERNAL_REFERENCE.as_ref() else {
        return Vec::new();
    };
    pattern
        .captures_iter(html)
        .filter_map(|captures| captures.get(1))
        .map(|url| url.as_str().to_owned())
        .collect()
}
