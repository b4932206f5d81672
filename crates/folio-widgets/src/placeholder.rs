#![forbid(unsafe_code)]

//! Filled box standing in for an image: icon centred, caption below it.

use crate::{Widget, draw_text_span};
use folio_core::geometry::Rect;
use folio_render::cell::Cell;
use folio_render::display_width;
use folio_render::frame::Frame;
use folio_style::Style;

/// Image placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePlaceholder<'a> {
    icon: &'a str,
    caption: &'a str,
    style: Style,
}

impl<'a> ImagePlaceholder<'a> {
    pub fn new(icon: &'a str, caption: &'a str) -> Self {
        Self {
            icon,
            caption,
            style: Style::default(),
        }
    }

    /// Fill and text style.
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

fn centered_x(area: Rect, text: &str) -> u16 {
    let width = u16::try_from(display_width(text)).unwrap_or(u16::MAX);
    area.x + area.width.saturating_sub(width) / 2
}

impl Widget for ImagePlaceholder<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() {
            return;
        }
        frame
            .buffer
            .fill(area, self.style.apply_to(Cell::from_char(' ')));

        // Icon on the middle row; caption on the row below when it fits.
        let icon_y = area.y + area.height.saturating_sub(1) / 2;
        let caption_y = icon_y + 1;
        let buf = &mut frame.buffer;
        draw_text_span(
            buf,
            centered_x(area, self.icon),
            icon_y,
            self.icon,
            self.style,
            area.right(),
        );
        if caption_y < area.bottom() {
            draw_text_span(
                buf,
                centered_x(area, self.caption),
                caption_y,
                self.caption,
                self.style,
                area.right(),
            );
        }
    }
}
