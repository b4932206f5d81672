#![forbid(unsafe_code)]

//! Outlined, non-interactive label ("chip").
//!
//! Rendered on one row as `[ label ]`, the brackets in the outline colour.

use crate::{Widget, draw_text_span};
use folio_core::geometry::Rect;
use folio_render::display_width;
use folio_render::frame::Frame;
use folio_style::Style;

/// A compact tag label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chip<'a> {
    label: &'a str,
    style: Style,
    outline_style: Style,
}

impl<'a> Chip<'a> {
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            style: Style::default(),
            outline_style: Style::default(),
        }
    }

    /// Style of the label text.
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Style of the brackets.
    pub fn outline_style(mut self, style: Style) -> Self {
        self.outline_style = style;
        self
    }

    /// Rendered width in cells.
    pub fn width(&self) -> u16 {
        u16::try_from(display_width(self.label))
            .unwrap_or(u16::MAX)
            .saturating_add(4)
    }
}

/// Total width of `labels` laid out as chips separated by `gap`.
pub fn chips_width<'a>(labels: impl IntoIterator<Item = &'a str>, gap: u16) -> u16 {
    let mut total = 0u16;
    for (i, label) in labels.into_iter().enumerate() {
        if i > 0 {
            total = total.saturating_add(gap);
        }
        total = total.saturating_add(Chip::new(label).width());
    }
    total
}

impl Widget for Chip<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() {
            return;
        }
        let buf = &mut frame.buffer;
        let max_x = area.right();
        let mut x = draw_text_span(buf, area.x, area.y, "[ ", self.outline_style, max_x);
        x = draw_text_span(buf, x, area.y, self.label, self.style, max_x);
        draw_text_span(buf, x, area.y, " ]", self.outline_style, max_x);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_render::buffer_to_text;

    #[test]
    fn width_includes_brackets() {
        assert_eq!(Chip::new("KMP").width(), 7);
        assert_eq!(chips_width(["KMP", "Web"], 1), 15);
        assert_eq!(chips_width(Vec::<&str>::new(), 1), 0);
    }

    #[test]
    fn renders_and_clips() {
        let mut frame = Frame::new(12, 1);
        Chip::new("Kotlin").render(frame.bounds(), &mut frame);
        assert_eq!(buffer_to_text(&frame.buffer), "[ Kotlin ]");

        let mut narrow = Frame::new(12, 1);
        Chip::new("Kotlin").render(Rect::new(0, 0, 5, 1), &mut narrow);
        assert_eq!(buffer_to_text(&narrow.buffer), "[ Kot");
    }
}
