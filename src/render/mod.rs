//! HTML rendering: escaped markup, palette, formatting, components and the
//! eight proposal sections.

pub mod assets;
pub mod components;
pub mod format;
pub mod palette;
pub mod sections;

pub use sections::{render_section, Fragment, SectionId};

/// A piece of HTML whose text content has already been escaped.
///
/// Client-supplied strings only enter a `Markup` through [`Markup::text`] or
/// [`escape`], so the section renderers cannot splice raw input into the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup(String);

impl Markup {
    /// Empty markup.
    pub fn new() -> Self {
        Self(String::new())
    }

    /// Wrap HTML that is already trusted (static markup or a sanitized fragment).
    pub(crate) fn trusted(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    /// Append escaped text.
    pub fn text(&mut self, text: &str) -> &mut Self {
        self.0.push_str(&escape(text));
        self
    }

    /// Append static markup written in this crate.
    pub(crate) fn raw(&mut self, html: &str) -> &mut Self {
        self.0.push_str(html);
        self
    }

    /// Append another markup block.
    pub fn push(&mut self, other: &Markup) -> &mut Self {
        self.0.push_str(&other.0);
        self
    }

    /// Append a markup block when present.
    pub fn push_opt(&mut self, other: Option<&Markup>) -> &mut Self {
        if let Some(other) = other {
            self.push(other);
        }
        self
    }

    /// Whether nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the HTML.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take the HTML.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Markup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Escape text for HTML element content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}
