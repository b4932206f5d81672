#![forbid(unsafe_code)]

//! Cell types: content, colors, and attribute flags.
//!
//! A [`Cell`] is one terminal grid position. Wide characters occupy a head
//! cell followed by [`CellContent::CONTINUATION`] cells.

use crate::char_width;

/// Content of one cell: a Unicode scalar or a sentinel.
///
/// - `EMPTY` (0): nothing drawn, width 0
/// - `CONTINUATION`: tail of a wide character, width 0
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct CellContent(u32);

impl CellContent {
    /// Empty cell content.
    pub const EMPTY: Self = Self(0);

    /// Continuation marker for wide characters.
    ///
    /// Outside the Unicode scalar range, so it never collides with a char.
    pub const CONTINUATION: Self = Self(0x7FFF_FFFF);

    /// Create content from a single character.
    #[inline]
    pub const fn from_char(c: char) -> Self {
        Self(c as u32)
    }

    /// Check if this is a continuation cell.
    #[inline]
    pub const fn is_continuation(self) -> bool {
        self.0 == Self::CONTINUATION.0
    }

    /// Check if this cell is empty.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == Self::EMPTY.0
    }

    /// The character, unless empty or continuation.
    #[inline]
    pub fn as_char(self) -> Option<char> {
        if self.is_empty() || self.is_continuation() {
            None
        } else {
            char::from_u32(self.0)
        }
    }

    /// Display width in cells.
    #[inline]
    pub fn width(self) -> usize {
        self.as_char().map_or(0, char_width)
    }

    /// Raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl Default for CellContent {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl std::fmt::Debug for CellContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            f.write_str("Empty")
        } else if self.is_continuation() {
            f.write_str("Continuation")
        } else {
            match self.as_char() {
                Some(c) => write!(f, "Char({c:?})"),
                None => write!(f, "Invalid({:#x})", self.0),
            }
        }
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Character or sentinel.
    pub content: CellContent,
    /// Foreground color.
    pub fg: PackedRgba,
    /// Background color. Transparent lets the terminal default show.
    pub bg: PackedRgba,
    /// Style flags.
    pub attrs: StyleFlags,
}

impl Cell {
    /// Tail cell of a wide character.
    pub const CONTINUATION: Self = Self {
        content: CellContent::CONTINUATION,
        fg: PackedRgba::TRANSPARENT,
        bg: PackedRgba::TRANSPARENT,
        attrs: StyleFlags::empty(),
    };

    /// Create a cell with the given content and default colors.
    #[inline]
    pub const fn new(content: CellContent) -> Self {
        Self {
            content,
            fg: PackedRgba::WHITE,
            bg: PackedRgba::TRANSPARENT,
            attrs: StyleFlags::empty(),
        }
    }

    /// Create a cell from a character.
    #[inline]
    pub const fn from_char(c: char) -> Self {
        Self::new(CellContent::from_char(c))
    }

    /// Check if this is a continuation cell.
    #[inline]
    pub const fn is_continuation(&self) -> bool {
        self.content.is_continuation()
    }

    /// Replace the content with `c`.
    #[inline]
    #[must_use]
    pub const fn with_char(mut self, c: char) -> Self {
        self.content = CellContent::from_char(c);
        self
    }

    #[inline]
    #[must_use]
    pub const fn with_fg(mut self, fg: PackedRgba) -> Self {
        self.fg = fg;
        self
    }

    #[inline]
    #[must_use]
    pub const fn with_bg(mut self, bg: PackedRgba) -> Self {
        self.bg = bg;
        self
    }

    #[inline]
    #[must_use]
    pub const fn with_attrs(mut self, attrs: StyleFlags) -> Self {
        self.attrs = attrs;
        self
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::new(CellContent::EMPTY)
    }
}

/// RGBA color packed into a `u32` as `0xRRGGBBAA`.
///
/// Straight (non-premultiplied) alpha. Compositing uses SourceOver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[repr(transparent)]
pub struct PackedRgba(pub u32);

impl PackedRgba {
    /// Fully transparent (alpha = 0).
    pub const TRANSPARENT: Self = Self(0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Create an opaque RGB color.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Create an RGBA color with explicit alpha.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | (a as u32))
    }

    /// Create a color from a `0xAARRGGBB` value.
    #[inline]
    pub const fn from_argb(argb: u32) -> Self {
        Self::rgba(
            (argb >> 16) as u8,
            (argb >> 8) as u8,
            argb as u8,
            (argb >> 24) as u8,
        )
    }

    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    #[inline]
    const fn div_round_u8(numer: u64, denom: u64) -> u8 {
        let v = (numer + (denom / 2)) / denom;
        if v > 255 { 255 } else { v as u8 }
    }

    /// Porter-Duff SourceOver: `self over dst`.
    pub fn over(self, dst: Self) -> Self {
        let s_a = self.a() as u64;
        if s_a == 255 {
            return self;
        }
        if s_a == 0 {
            return dst;
        }

        let d_a = dst.a() as u64;
        let inv_s_a = 255 - s_a;
        let numer_a = 255 * s_a + d_a * inv_s_a;
        if numer_a == 0 {
            return Self::TRANSPARENT;
        }

        let out_a = Self::div_round_u8(numer_a, 255);
        let channel = |s: u8, d: u8| {
            Self::div_round_u8(
                (s as u64) * s_a * 255 + (d as u64) * d_a * inv_s_a,
                numer_a,
            )
        };

        Self::rgba(
            channel(self.r(), dst.r()),
            channel(self.g(), dst.g()),
            channel(self.b(), dst.b()),
            out_a,
        )
    }

    /// Scale alpha by `opacity` in `[0.0, 1.0]`.
    pub fn with_opacity(self, opacity: f32) -> Self {
        let opacity = opacity.clamp(0.0, 1.0);
        let a = ((self.a() as f32) * opacity).round().clamp(0.0, 255.0) as u8;
        Self::rgba(self.r(), self.g(), self.b(), a)
    }
}

bitflags::bitflags! {
    /// Text style attributes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: u8 {
        const BOLD          = 0b0000_0001;
        const DIM           = 0b0000_0010;
        const ITALIC        = 0b0000_0100;
        const UNDERLINE     = 0b0000_1000;
        const BLINK         = 0b0001_0000;
        const REVERSE       = 0b0010_0000;
        const STRIKETHROUGH = 0b0100_0000;
        const HIDDEN        = 0b1000_0000;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_sentinels() {
        assert!(CellContent::EMPTY.is_empty());
        assert!(CellContent::CONTINUATION.is_continuation());
        assert_eq!(CellContent::EMPTY.as_char(), None);
        assert_eq!(CellContent::CONTINUATION.width(), 0);
        assert_eq!(CellContent::from_char('a').as_char(), Some('a'));
    }

    #[test]
    fn content_width_handles_wide_chars() {
        assert_eq!(CellContent::from_char('x').width(), 1);
        assert_eq!(CellContent::from_char('中').width(), 2);
    }

    #[test]
    fn argb_matches_rgba_channels() {
        let c = PackedRgba::from_argb(0xFF64_B5F6);
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (0x64, 0xB5, 0xF6, 0xFF));
    }

    #[test]
    fn over_opaque_and_transparent() {
        let red = PackedRgba::rgb(255, 0, 0);
        assert_eq!(red.over(PackedRgba::BLACK), red);
        assert_eq!(PackedRgba::TRANSPARENT.over(red), red);
    }

    #[test]
    fn over_half_alpha_blends() {
        let half_white = PackedRgba::WHITE.with_opacity(0.5);
        let out = half_white.over(PackedRgba::BLACK);
        assert_eq!(out.a(), 255);
        assert!((127..=129).contains(&out.r()));
        assert_eq!(out.r(), out.g());
    }

    #[test]
    fn cell_builders() {
        let cell = Cell::from_char('A')
            .with_fg(PackedRgba::BLACK)
            .with_bg(PackedRgba::WHITE)
            .with_attrs(StyleFlags::BOLD);
        assert_eq!(cell.content.as_char(), Some('A'));
        assert_eq!(cell.fg, PackedRgba::BLACK);
        assert!(cell.attrs.contains(StyleFlags::BOLD));
        assert_eq!(Cell::default().content, CellContent::EMPTY);
    }
}
