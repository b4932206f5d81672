#![forbid(unsafe_code)]

//! Round profile badge with a centred icon.
//!
//! The disc is drawn with half blocks so it reads as round in a terminal:
//!
//! ```text
//!  ▄▄▄▄▄▄▄
//! ███ ☻ ███
//!  ▀▀▀▀▀▀▀
//! ```

use crate::{Widget, draw_text_span};
use folio_core::geometry::Rect;
use folio_render::cell::{Cell, PackedRgba};
use folio_render::display_width;
use folio_render::frame::Frame;
use folio_style::Style;

/// A fixed-size circular avatar placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Avatar<'a> {
    glyph: &'a str,
    disc: PackedRgba,
    icon_style: Style,
}

impl<'a> Avatar<'a> {
    /// Width of the disc in cells.
    pub const WIDTH: u16 = 9;
    /// Height of the disc in rows.
    pub const HEIGHT: u16 = 3;

    pub fn new(glyph: &'a str, disc: PackedRgba) -> Self {
        Self {
            glyph,
            disc,
            icon_style: Style::default(),
        }
    }

    pub fn icon_style(mut self, style: Style) -> Self {
        self.icon_style = style;
        self
    }
}

impl Widget for Avatar<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.width < Self::WIDTH || area.height < Self::HEIGHT {
            return;
        }
        let x = area.x + (area.width - Self::WIDTH) / 2;
        let (top, mid, bottom) = (area.y, area.y + 1, area.y + 2);
        let buf = &mut frame.buffer;

        let edge = |c: char| Cell::from_char(c).with_fg(self.disc);
        for dx in 1..Self::WIDTH - 1 {
            buf.set(x + dx, top, edge('▄'));
            buf.set(x + dx, bottom, edge('▀'));
        }
        buf.fill(
            Rect::new(x, mid, Self::WIDTH, 1),
            Cell::from_char(' ').with_bg(self.disc),
        );

        let glyph_width = u16::try_from(display_width(self.glyph)).unwrap_or(Self::WIDTH);
        let gx = x + Self::WIDTH.saturating_sub(glyph_width) / 2;
        draw_text_span(buf, gx, mid, self.glyph, self.icon_style, x + Self::WIDTH);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_render::buffer_to_text;

    #[test]
    fn renders_centred_disc() {
        let disc = PackedRgba::rgb(20, 40, 60);
        let mut frame = Frame::new(11, 3);
        Avatar::new("☻", disc).render(frame.bounds(), &mut frame);

        assert_eq!(
            buffer_to_text(&frame.buffer),
            "  ▄▄▄▄▄▄▄\n     ☻\n  ▀▀▀▀▀▀▀"
        );
        assert_eq!(frame.buffer.get(1, 1).map(|c| c.bg), Some(disc));
        assert_eq!(frame.buffer.get(5, 1).map(|c| c.bg), Some(disc));
    }

    #[test]
    fn too_small_area_draws_nothing() {
        let mut frame = Frame::new(8, 3);
        Avatar::new("☻", PackedRgba::WHITE).render(frame.bounds(), &mut frame);
        assert_eq!(buffer_to_text(&frame.buffer), "");
    }
}
