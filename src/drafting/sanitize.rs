//! Cleanup applied to drafted HTML before it reaches the document.
//!
//! Drafted markup is rebuilt against an allow-list: only the tags and classes
//! the system prompt offers survive, each with a fixed set of attributes.
//! Everything else is unwrapped to its text, and elements that embed or run
//! content are removed together with what they contain.

use std::fmt::Write as _;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use thiserror::Error;

use crate::layout::{asset_allowed, external_references};

/// Tags a drafted fragment may use.
pub const ALLOWED_TAGS: &[&str] = &[
    "p", "h3", "h4", "ul", "ol", "li", "strong", "em", "div", "span", "br", "table", "thead",
    "tbody", "tr", "th", "td", "img",
];

/// Classes a drafted fragment may use.
pub const ALLOWED_CLASSES: &[&str] = &[
    "info-box",
    "warning-box",
    "success-box",
    "highlight-box",
    "checklist",
    "card-grid",
    "card",
    "card-header",
    "price-box",
    "section-icon",
    "platform-logo-section",
    "platform-badge",
    "platform-logo",
    "platform-badge-text",
];

/// Elements dropped with their content.
const DROPPED_ELEMENTS: &[&str] = &[
    "script", "style", "iframe", "object", "embed", "video", "audio", "svg", "math", "template",
    "noscript", "canvas", "form", "textarea", "select", "button", "head", "title",
];

/// Why a drafted fragment was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// Nothing usable remained after cleanup.
    #[error("provider returned no usable content")]
    Empty,
    /// An external URL outside the asset allow-list survived cleanup.
    #[error("fragment references a non-allow-listed URL: {0}")]
    ExternalReference(String),
    /// The cleanup patterns could not be built.
    #[error("fragment sanitizer is unavailable")]
    Unavailable,
}

struct Patterns {
    fence_open: Regex,
    fence_close: Regex,
    comment: Regex,
    dropped: Vec<Regex>,
    tag: Regex,
    attribute: Regex,
}

static PATTERNS: LazyLock<Option<Patterns>> = LazyLock::new(|| {
    let dropped = DROPPED_ELEMENTS
        .iter()
        .map(|name| {
            Regex::new(&format!(
                r"(?is)<{name}\b[^>]*>.*?</{name}\s*>|<{name}\b[^>]*/>"
            ))
            .ok()
        })
        .collect::<Option<Vec<_>>>()?;
    Some(Patterns {
        fence_open: Regex::new(r"^\s*```[A-Za-z]*[ \t]*\r?\n?").ok()?,
        fence_close: Regex::new(r"\r?\n?```\s*$").ok()?,
        comment: Regex::new(r"(?s)<!--.*?-->|<![^>]*>|<\?[^>]*>").ok()?,
        dropped,
        tag: Regex::new(r"<(/?)([A-Za-z][A-Za-z0-9-]*)([^>]*)>").ok()?,
        attribute: Regex::new(
            r#"([A-Za-z_:][-A-Za-z0-9_:.]*)(?:\s*=\s*("[^"]*"|'[^']*'|[^\s"'>]+))?"#,
        )
        .ok()?,
    })
});

/// Clean a drafted fragment.
///
/// Strips markdown code fences and comments, removes embedding and scripting
/// elements with their content, and unwraps any tag outside
/// [`ALLOWED_TAGS`]. Surviving tags keep only `class` (filtered to
/// [`ALLOWED_CLASSES`]), `alt` on images and `colspan`/`rowspan` on cells.
/// An `<img>` survives only with an allow-listed `src`.
///
/// # Errors
///
/// [`Rejection::Empty`] when nothing remains, and
/// [`Rejection::ExternalReference`] when the cleaned markup still names a URL
/// outside the asset allow-list.
pub fn sanitize_fragment(raw: &str) -> Result<String, Rejection> {
    let patterns = PATTERNS.as_ref().ok_or(Rejection::Unavailable)?;

    let text = patterns.fence_open.replace(raw, "");
    let text = patterns.fence_close.replace(&text, "");
    let mut text = patterns.comment.replace_all(&text, "").into_owned();
    for element in &patterns.dropped {
        text = element.replace_all(&text, "").into_owned();
    }
    let text = patterns
        .tag
        .replace_all(&text, |caps: &Captures<'_>| rebuild_tag(patterns, caps));

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(Rejection::Empty);
    }
    if let Some(url) = external_references(trimmed)
        .into_iter()
        .find(|url| !asset_allowed(url))
    {
        return Err(Rejection::ExternalReference(url));
    }
    Ok(trimmed.to_owned())
}

fn rebuild_tag(patterns: &Patterns, caps: &Captures<'_>) -> String {
    let closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
    let name = caps
        .get(2)
        .map_or(String::new(), |m| m.as_str().to_ascii_lowercase());
    if !ALLOWED_TAGS.contains(&name.as_str()) {
        return String::new();
    }
    if closing {
        return if name == "img" || name == "br" {
            String::new()
        } else {
            format!("</{name}>")
        };
    }

    let mut kept = String::new();
    let mut has_source = false;
    let attributes = caps.get(3).map_or("", |m| m.as_str());
    for attr in patterns.attribute.captures_iter(attributes) {
        let key = attr
            .get(1)
            .map_or(String::new(), |m| m.as_str().to_ascii_lowercase());
        let value = attr.get(2).map_or("", |m| unquote(m.as_str()));
        let value = match (name.as_str(), key.as_str()) {
            (_, "class") => {
                let classes: Vec<&str> = value
                    .split_whitespace()
                    .filter(|class| ALLOWED_CLASSES.contains(class))
                    .collect();
                if classes.is_empty() {
                    continue;
                }
                classes.join(" ")
            }
            ("img", "src") if asset_allowed(value) => {
                has_source = true;
                value.trim().to_owned()
            }
            ("img", "alt") | ("th" | "td", "colspan" | "rowspan") => value.to_owned(),
            _ => continue,
        };
        let _ = write!(kept, " {key}=\"{}\"", value.replace('"', "&quot;"));
    }

    if name == "img" && !has_source {
        return String::new();
    }
    format!("<{name}{kept}>")
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
        .unwrap_or(value)
}
