#![forbid(unsafe_code)]

//! Cell style with optional properties.
//!
//! A `Style` only overrides the properties it sets, so styles layer:
//! `base.patch(overlay)` keeps everything from `base` that `overlay` leaves
//! unset.

use folio_render::cell::{Cell, PackedRgba, StyleFlags};

/// Foreground, background and attribute overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Style {
    pub fg: Option<PackedRgba>,
    pub bg: Option<PackedRgba>,
    pub attrs: Option<StyleFlags>,
}

impl Style {
    /// An empty style that changes nothing.
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            attrs: None,
        }
    }

    #[must_use]
    pub const fn fg(mut self, color: PackedRgba) -> Self {
        self.fg = Some(color);
        self
    }

    #[must_use]
    pub const fn bg(mut self, color: PackedRgba) -> Self {
        self.bg = Some(color);
        self
    }

    /// Add attribute flags to the style.
    #[must_use]
    pub fn attrs(mut self, flags: StyleFlags) -> Self {
        self.attrs = Some(self.attrs.unwrap_or_default() | flags);
        self
    }

    #[must_use]
    pub fn bold(self) -> Self {
        self.attrs(StyleFlags::BOLD)
    }

    /// Layer `other` on top of `self`.
    #[must_use]
    pub fn patch(self, other: Style) -> Self {
        Self {
            fg: other.fg.or(self.fg),
            bg: other.bg.or(self.bg),
            attrs: match (self.attrs, other.attrs) {
                (Some(a), Some(b)) => Some(a | b),
                (a, b) => b.or(a),
            },
        }
    }

    /// Apply the set properties to `cell`.
    pub fn apply_to(&self, mut cell: Cell) -> Cell {
        if let Some(fg) = self.fg {
            cell.fg = fg;
        }
        if let Some(bg) = self.bg {
            cell.bg = bg;
        }
        if let Some(attrs) = self.attrs {
            cell.attrs |= attrs;
        }
        cell
    }

    /// A blank cell carrying this style.
    pub fn cell(&self) -> Cell {
        self.apply_to(Cell::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_prefers_overlay_and_merges_flags() {
        let base = Style::new().fg(PackedRgba::WHITE).bg(PackedRgba::BLACK).bold();
        let overlay = Style::new().fg(PackedRgba::rgb(1, 2, 3)).attrs(StyleFlags::ITALIC);
        let merged = base.patch(overlay);

        assert_eq!(merged.fg, Some(PackedRgba::rgb(1, 2, 3)));
        assert_eq!(merged.bg, Some(PackedRgba::BLACK));
        assert_eq!(merged.attrs, Some(StyleFlags::BOLD | StyleFlags::ITALIC));
    }

    #[test]
    fn apply_to_leaves_unset_properties() {
        let cell = Cell::from_char('x').with_bg(PackedRgba::BLACK);
        let styled = Style::new().fg(PackedRgba::rgb(9, 9, 9)).apply_to(cell);
        assert_eq!(styled.bg, PackedRgba::BLACK);
        assert_eq!(styled.fg, PackedRgba::rgb(9, 9, 9));
        assert_eq!(styled.content.as_char(), Some('x'));
    }

    #[test]
    fn empty_style_is_identity() {
        let cell = Cell::from_char('q');
        assert_eq!(Style::default().apply_to(cell), cell);
    }
}
