#![forbid(unsafe_code)]

//! Dark colour scheme with semantic slots.
//!
//! ```
//! use folio_style::theme::Theme;
//!
//! let theme = Theme::dark();
//! let card = theme.surface_style();
//! assert_eq!(card.bg, Some(theme.surface));
//! ```

use folio_render::cell::PackedRgba;

use crate::style::Style;

/// Semantic colour slots used by the portfolio views.
///
/// Translucent colours from the palette are pre-composited over the
/// background they are drawn on, since terminal cells cannot blend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Accent for headings, the role line, buttons and focus.
    pub primary: PackedRgba,
    /// Text on `primary`.
    pub on_primary: PackedRgba,
    /// Screen background.
    pub background: PackedRgba,
    /// Text on `background`.
    pub on_background: PackedRgba,
    /// Card surface.
    pub surface: PackedRgba,
    /// Text on `surface`.
    pub on_surface: PackedRgba,
    /// Secondary text on cards (descriptions).
    pub text_muted: PackedRgba,
    /// Bio paragraph on the background.
    pub text_soft: PackedRgba,
    /// Divider line.
    pub divider: PackedRgba,
    /// Chip outline.
    pub outline: PackedRgba,
    /// Image placeholder fill.
    pub placeholder_bg: PackedRgba,
    /// Image placeholder icon and caption.
    pub placeholder_fg: PackedRgba,
    /// Avatar disc behind the profile icon.
    pub avatar_bg: PackedRgba,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// The portfolio's dark scheme: light blue accent on near-black.
    pub fn dark() -> Self {
        let primary = PackedRgba::from_argb(0xFF64_B5F6);
        let background = PackedRgba::from_argb(0xFF12_1212);
        let surface = PackedRgba::from_argb(0xFF1E_1E1E);
        let white = PackedRgba::WHITE;
        let gray = PackedRgba::from_argb(0xFF88_8888);

        Self {
            primary,
            on_primary: PackedRgba::BLACK,
            background,
            on_background: white,
            surface,
            on_surface: white,
            text_muted: white.with_opacity(0.7).over(surface),
            text_soft: white.with_opacity(0.8).over(background),
            divider: gray.with_opacity(0.3).over(background),
            outline: PackedRgba::from_argb(0xFF93_8F99),
            placeholder_bg: PackedRgba::from_argb(0xFF44_4444),
            placeholder_fg: PackedRgba::from_argb(0xFFCC_CCCC),
            avatar_bg: primary.with_opacity(0.2).over(background),
        }
    }

    /// Plain text on the screen background.
    pub fn base_style(&self) -> Style {
        Style::new().fg(self.on_background).bg(self.background)
    }

    /// Card body.
    pub fn surface_style(&self) -> Style {
        Style::new().fg(self.on_surface).bg(self.surface)
    }

    /// Accent text (headings, role line).
    pub fn accent_style(&self) -> Style {
        Style::new().fg(self.primary)
    }

    /// Filled button.
    pub fn button_style(&self) -> Style {
        Style::new().fg(self.on_primary).bg(self.primary).bold()
    }

    /// Button with keyboard focus.
    pub fn button_focused_style(&self) -> Style {
        Style::new()
            .fg(self.on_primary)
            .bg(self.on_surface)
            .bold()
            .attrs(folio_render::cell::StyleFlags::UNDERLINE)
    }
}
