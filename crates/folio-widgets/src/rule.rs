#![forbid(unsafe_code)]

//! Horizontal rule (divider) widget.

use crate::Widget;
use crate::block::BorderType;
use folio_core::geometry::Rect;
use folio_render::cell::Cell;
use folio_render::drawing::Draw;
use folio_render::frame::Frame;
use folio_style::Style;

/// A single-row horizontal line across the available width.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Rule {
    style: Style,
    border_type: BorderType,
}

impl Rule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn border_type(mut self, border_type: BorderType) -> Self {
        self.border_type = border_type;
        self
    }
}

impl Widget for Rule {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() {
            return;
        }
        let line = self.border_type.to_border_chars().horizontal;
        let cell = self.style.apply_to(Cell::from_char(line));
        frame
            .buffer
            .draw_horizontal_line(area.x, area.y, area.width, cell);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_render::buffer_to_text;
    use folio_render::cell::PackedRgba;

    #[test]
    fn draws_one_row() {
        let gray = PackedRgba::rgb(60, 60, 60);
        let mut frame = Frame::new(5, 2);
        Rule::new()
            .style(Style::new().fg(gray))
            .render(frame.bounds(), &mut frame);
        assert_eq!(buffer_to_text(&frame.buffer), "─────");
        assert_eq!(frame.buffer.get(0, 0).map(|c| c.fg), Some(gray));
    }
}
