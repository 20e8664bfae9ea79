//! Background surfaces and their paired text tones.
//!
//! The pairing lives in one static table. Components never pick a text colour
//! themselves: [`COMPONENTS`] maps every component class to its surface,
//! [`Component::classes`] emits the component, surface and text classes
//! together, and [`contrast_rules`] turns both tables into stylesheet rules.
//! A drafted `<div class="price-box">` is therefore painted by the component
//! class alone.

use std::fmt::Write as _;

/// Background treatment of a visual component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    /// Plain white background (cards, badges).
    Paper,
    /// Light tinted background (info, warning, success and highlight boxes).
    Mist,
    /// Dark gradient background (cover, price boxes).
    Midnight,
}

/// Text colour class paired with a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextTone {
    /// Near-black text for light backgrounds.
    Dark,
    /// White text for dark backgrounds.
    Light,
}

/// One row of the palette table.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceStyle {
    /// Surface this row describes.
    pub surface: Surface,
    /// CSS class carrying the background.
    pub class: &'static str,
    /// CSS `background` value.
    pub background: &'static str,
    /// Paired text tone.
    pub tone: TextTone,
}

/// Background class to text tone table.
pub static PALETTE: [SurfaceStyle; 3] = [
    SurfaceStyle {
        surface: Surface::Paper,
        class: "surface-paper",
        background: "#ffffff",
        tone: TextTone::Dark,
    },
    SurfaceStyle {
        surface: Surface::Mist,
        class: "surface-mist",
        background: "#f2f5f9",
        tone: TextTone::Dark,
    },
    SurfaceStyle {
        surface: Surface::Midnight,
        class: "surface-midnight",
        background: "linear-gradient(135deg, #0b1f3a 0%, #1c4e80 100%)",
        tone: TextTone::Light,
    },
];

/// A painted component of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    /// `info-box` call-out.
    InfoBox,
    /// `warning-box` call-out.
    WarningBox,
    /// `success-box` call-out.
    SuccessBox,
    /// `highlight-box` call-out.
    HighlightBox,
    /// Package pricing panel.
    PriceBox,
    /// Grid card.
    Card,
    /// Channel badge.
    PlatformBadge,
    /// Cover header.
    Cover,
    /// Section navigation bar.
    Nav,
    /// Document footer.
    Footer,
}

/// One row of the component table.
#[derive(Debug, Clone, Copy)]
pub struct ComponentStyle {
    /// Component this row describes.
    pub component: Component,
    /// Component class name.
    pub class: &'static str,
    /// Surface the component paints.
    pub surface: Surface,
}

/// Component class to surface table.
pub static COMPONENTS: [ComponentStyle; 10] = [
    ComponentStyle {
        component: Component::InfoBox,
        class: "info-box",
        surface: Surface::Mist,
    },
    ComponentStyle {
        component: Component::WarningBox,
        class: "warning-box",
        surface: Surface::Mist,
    },
    ComponentStyle {
        component: Component::SuccessBox,
        class: "success-box",
        surface: Surface::Mist,
    },
    ComponentStyle {
        component: Component::HighlightBox,
        class: "highlight-box",
        surface: Surface::Mist,
    },
    ComponentStyle {
        component: Component::PriceBox,
        class: "price-box",
        surface: Surface::Midnight,
    },
    ComponentStyle {
        component: Component::Card,
        class: "card",
        surface: Surface::Paper,
    },
    ComponentStyle {
        component: Component::PlatformBadge,
        class: "platform-badge",
        surface: Surface::Paper,
    },
    ComponentStyle {
        component: Component::Cover,
        class: "cover",
        surface: Surface::Midnight,
    },
    ComponentStyle {
        component: Component::Nav,
        class: "proposal-nav",
        surface: Surface::Paper,
    },
    ComponentStyle {
        component: Component::Footer,
        class: "proposal-footer",
        surface: Surface::Midnight,
    },
];

impl Component {
    /// Every component, in table order.
    pub const ALL: [Component; 10] = [
        Component::InfoBox,
        Component::WarningBox,
        Component::SuccessBox,
        Component::HighlightBox,
        Component::PriceBox,
        Component::Card,
        Component::PlatformBadge,
        Component::Cover,
        Component::Nav,
        Component::Footer,
    ];

    /// The table row for this component.
    pub fn style(self) -> &'static ComponentStyle {
        match self {
            Self::InfoBox => &COMPONENTS[0],
            Self::WarningBox => &COMPONENTS[1],
            Self::SuccessBox => &COMPONENTS[2],
            Self::HighlightBox => &COMPONENTS[3],
            Self::PriceBox => &COMPONENTS[4],
            Self::Card => &COMPONENTS[5],
            Self::PlatformBadge => &COMPONENTS[6],
            Self::Cover => &COMPONENTS[7],
            Self::Nav => &COMPONENTS[8],
            Self::Footer => &COMPONENTS[9],
        }
    }

    /// Component class name.
    pub fn class(self) -> &'static str {
        self.style().class
    }

    /// Surface this component paints.
    pub fn surface(self) -> Surface {
        self.style().surface
    }

    /// Component class followed by its surface and text classes.
    pub fn classes(self) -> String {
        format!("{} {}", self.class(), self.surface().classes())
    }
}

impl Surface {
    /// Every surface, in table order.
    pub const ALL: [Surface; 3] = [Surface::Paper, Surface::Mist, Surface::Midnight];

    /// The palette row for this surface.
    pub fn style(self) -> &'static SurfaceStyle {
        match self {
            Self::Paper => &PALETTE[0],
            Self::Mist => &PALETTE[1],
            Self::Midnight => &PALETTE[2],
        }
    }

    /// Background class name.
    pub fn class(self) -> &'static str {
        self.style().class
    }

    /// Text tone paired with this surface.
    pub fn text_tone(self) -> TextTone {
        self.style().tone
    }

    /// Background class and paired text class, space separated.
    pub fn classes(self) -> String {
        format!("{} {}", self.class(), self.text_tone().class())
    }
}

impl TextTone {
    /// CSS class name.
    pub const fn class(self) -> &'static str {
        match self {
            Self::Dark => "text-dark",
            Self::Light => "text-light",
        }
    }

    /// CSS colour value.
    pub const fn color(self) -> &'static str {
        match self {
            Self::Dark => "#1d1d1f",
            Self::Light => "#ffffff",
        }
    }
}

fn paint_rule(css: &mut String, class: &str, row: &SurfaceStyle) {
    let _ = writeln!(
        css,
        ".{class} {{ background: {}; color: {}; }}",
        row.background,
        row.tone.color()
    );
    let _ = writeln!(
        css,
        ".{class} h2, .{class} h3, .{class} h4, .{class} p, .{class} li, \
         .{class} strong, .{class} span, .{class} td, .{class} th {{ color: inherit; }}"
    );
}

/// Stylesheet rules generated from [`PALETTE`] and [`COMPONENTS`].
///
/// Each surface class and each component class sets its background and
/// paired colour, and forces the common text elements inside it to inherit
/// that colour.
pub fn contrast_rules() -> String {
    let mut css = String::from("/* surface / text pairing */\n");
    for row in &PALETTE {
        paint_rule(&mut css, row.class, row);
    }
    css.push_str("/* component surfaces */\n");
    for row in &COMPONENTS {
        paint_rule(&mut css, row.class, row.surface.style());
    }
    for tone in [TextTone::Dark, TextTone::Light] {
        let _ = writeln!(css, ".{} {{ color: {}; }}", tone.class(), tone.color());
    }
    css
}
