#![forbid(unsafe_code)]

//! Clickable button.
//!
//! A padded label on a filled background. Rendering registers a
//! [`HitRegion::Button`] over the painted cells so the model can map a click
//! back to the button's [`HitId`].

use crate::{Widget, draw_text_span};
use folio_core::geometry::Rect;
use folio_render::cell::Cell;
use folio_render::display_width;
use folio_render::frame::{Frame, HitData, HitId, HitRegion};
use folio_style::Style;

const PADDING: u16 = 2;

/// A single-row push button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button<'a> {
    label: &'a str,
    id: HitId,
    data: HitData,
    style: Style,
    focused_style: Style,
    focused: bool,
}

impl<'a> Button<'a> {
    pub fn new(label: &'a str, id: HitId) -> Self {
        Self {
            label,
            id,
            data: 0,
            style: Style::default(),
            focused_style: Style::default(),
            focused: false,
        }
    }

    /// Extra data stored in the hit cells.
    pub fn data(mut self, data: HitData) -> Self {
        self.data = data;
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Style used instead of `style` while focused.
    pub fn focused_style(mut self, style: Style) -> Self {
        self.focused_style = style;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Rendered width in cells.
    pub fn width(&self) -> u16 {
        u16::try_from(display_width(self.label))
            .unwrap_or(u16::MAX)
            .saturating_add(PADDING * 2)
    }
}

impl Widget for Button<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        let area = Rect::new(area.x, area.y, area.width.min(self.width()), area.height.min(1));
        if area.is_empty() {
            return;
        }
        let style = if self.focused {
            self.style.patch(self.focused_style)
        } else {
            self.style
        };

        frame.buffer.fill(area, style.apply_to(Cell::from_char(' ')));
        draw_text_span(
            &mut frame.buffer,
            area.x.saturating_add(PADDING),
            area.y,
            self.label,
            style,
            area.right(),
        );
        frame.register_hit(area, self.id, HitRegion::Button, self.data);
    }
}
