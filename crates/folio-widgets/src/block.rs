#![forbid(unsafe_code)]

use crate::{Widget, set_style_area};
use folio_core::geometry::Rect;
use folio_render::cell::{Cell, CellContent};
use folio_render::drawing::BorderChars;
use folio_render::frame::Frame;
use folio_style::Style;

bitflags::bitflags! {
    /// Which sides of a block get a border.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Borders: u8 {
        const TOP    = 0b0001;
        const RIGHT  = 0b0010;
        const BOTTOM = 0b0100;
        const LEFT   = 0b1000;
        const ALL    = Self::TOP.bits() | Self::RIGHT.bits() | Self::BOTTOM.bits() | Self::LEFT.bits();
    }
}

/// Border character set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BorderType {
    #[default]
    Square,
    Rounded,
}

impl BorderType {
    pub const fn to_border_chars(self) -> BorderChars {
        match self {
            BorderType::Square => BorderChars::SQUARE,
            BorderType::Rounded => BorderChars::ROUNDED,
        }
    }
}

/// Text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// A widget that fills an area and draws optional borders.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block {
    borders: Borders,
    border_style: Style,
    border_type: BorderType,
    style: Style,
}

impl Block {
    pub fn new() -> Self {
        Self::default()
    }

    /// A block with all borders enabled.
    pub fn bordered() -> Self {
        Self::default().borders(Borders::ALL)
    }

    pub fn borders(mut self, borders: Borders) -> Self {
        self.borders = borders;
        self
    }

    /// Style applied to border characters.
    pub fn border_style(mut self, style: Style) -> Self {
        self.border_style = style;
        self
    }

    pub fn border_type(mut self, border_type: BorderType) -> Self {
        self.border_type = border_type;
        self
    }

    /// Style for the whole block area (usually a background).
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// The area inside the borders.
    pub fn inner(&self, area: Rect) -> Rect {
        let mut inner = area;
        if self.borders.contains(Borders::LEFT) {
            inner.x = inner.x.saturating_add(1);
            inner.width = inner.width.saturating_sub(1);
        }
        if self.borders.contains(Borders::TOP) {
            inner.y = inner.y.saturating_add(1);
            inner.height = inner.height.saturating_sub(1);
        }
        if self.borders.contains(Borders::RIGHT) {
            inner.width = inner.width.saturating_sub(1);
        }
        if self.borders.contains(Borders::BOTTOM) {
            inner.height = inner.height.saturating_sub(1);
        }
        inner
    }

    /// Rows and columns taken by borders: `(horizontal, vertical)`.
    pub fn chrome_size(&self) -> (u16, u16) {
        let horizontal = self.borders.contains(Borders::LEFT) as u16
            + self.borders.contains(Borders::RIGHT) as u16;
        let vertical = self.borders.contains(Borders::TOP) as u16
            + self.borders.contains(Borders::BOTTOM) as u16;
        (horizontal, vertical)
    }

    fn border_cell(&self, c: char) -> Cell {
        self.style
            .patch(self.border_style)
            .apply_to(Cell::new(CellContent::from_char(c)))
    }

    fn render_borders(&self, area: Rect, frame: &mut Frame) {
        let set = self.border_type.to_border_chars();
        let buf = &mut frame.buffer;
        let (right, bottom) = (area.right() - 1, area.bottom() - 1);

        if self.borders.contains(Borders::LEFT) {
            for y in area.y..area.bottom() {
                buf.set(area.x, y, self.border_cell(set.vertical));
            }
        }
        if self.borders.contains(Borders::RIGHT) {
            for y in area.y..area.bottom() {
                buf.set(right, y, self.border_cell(set.vertical));
            }
        }
        if self.borders.contains(Borders::TOP) {
            for x in area.x..area.right() {
                buf.set(x, area.y, self.border_cell(set.horizontal));
            }
        }
        if self.borders.contains(Borders::BOTTOM) {
            for x in area.x..area.right() {
                buf.set(x, bottom, self.border_cell(set.horizontal));
            }
        }

        // Corners after edges.
        if self.borders.contains(Borders::LEFT | Borders::TOP) {
            buf.set(area.x, area.y, self.border_cell(set.top_left));
        }
        if self.borders.contains(Borders::RIGHT | Borders::TOP) {
            buf.set(right, area.y, self.border_cell(set.top_right));
        }
        if self.borders.contains(Borders::LEFT | Borders::BOTTOM) {
            buf.set(area.x, bottom, self.border_cell(set.bottom_left));
        }
        if self.borders.contains(Borders::RIGHT | Borders::BOTTOM) {
            buf.set(right, bottom, self.border_cell(set.bottom_right));
        }
    }
}

impl Widget for Block {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() {
            return;
        }
        if let Some(bg) = self.style.bg {
            frame.buffer.fill(area, Cell::default().with_bg(bg));
        }
        set_style_area(&mut frame.buffer, area, self.style);
        if !self.borders.is_empty() {
            self.render_borders(area, frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_render::buffer_to_text;
    use folio_render::cell::PackedRgba;

    #[test]
    fn inner_removes_borders() {
        let block = Block::bordered();
        assert_eq!(block.inner(Rect::new(0, 0, 10, 5)), Rect::new(1, 1, 8, 3));
        assert_eq!(block.chrome_size(), (2, 2));
        assert_eq!(Block::new().inner(Rect::new(2, 2, 4, 4)), Rect::new(2, 2, 4, 4));
    }

    #[test]
    fn rounded_block_draws_corners_and_fills_background() {
        let bg = PackedRgba::rgb(30, 30, 30);
        let mut frame = Frame::new(6, 3);
        Block::bordered()
            .border_type(BorderType::Rounded)
            .style(Style::new().bg(bg))
            .render(frame.bounds(), &mut frame);

        assert_eq!(buffer_to_text(&frame.buffer), "╭────╮\n│    │\n╰────╯");
        assert!(frame.buffer.cells().iter().all(|c| c.bg == bg));
    }

    #[test]
    fn partial_borders() {
        let mut frame = Frame::new(4, 2);
        Block::new()
            .borders(Borders::TOP)
            .render(frame.bounds(), &mut frame);
        assert_eq!(buffer_to_text(&frame.buffer), "────");
    }

    #[test]
    fn empty_area_is_noop() {
        let mut frame = Frame::new(4, 2);
        Block::bordered().render(Rect::new(0, 0, 0, 2), &mut frame);
        assert_eq!(buffer_to_text(&frame.buffer), "");
    }
}
