#![forbid(unsafe_code)]

//! Widgets for the portfolio views.

pub mod avatar;
pub mod block;
pub mod button;
pub mod chip;
pub mod paragraph;
pub mod placeholder;
pub mod rule;

pub use avatar::Avatar;
pub use block::{Alignment, Block, BorderType, Borders};
pub use button::Button;
pub use chip::{Chip, chips_width};
pub use paragraph::{Paragraph, wrap_text};
pub use placeholder::ImagePlaceholder;
pub use rule::Rule;

use folio_core::geometry::Rect;
use folio_render::buffer::Buffer;
use folio_render::cell::Cell;
use folio_render::frame::Frame;
use folio_style::Style;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// A `Widget` is a renderable component.
///
/// Widgets draw into the frame's buffer within `area` and may register hit
/// regions on the frame for mouse interaction.
pub trait Widget {
    /// Render the widget into the frame at the given area.
    fn render(&self, area: Rect, frame: &mut Frame);
}

/// Apply a style to all cells in a rectangular area, keeping content.
pub(crate) fn set_style_area(buf: &mut Buffer, area: Rect, style: Style) {
    if style == Style::default() {
        return;
    }
    let area = area.intersection(&buf.current_scissor());
    for y in area.y..area.bottom() {
        for x in area.x..area.right() {
            if let Some(cell) = buf.get_mut(x, y) {
                *cell = style.apply_to(*cell);
            }
        }
    }
}

/// Draw a text span at (x, y), stopping at `max_x` (exclusive).
///
/// Returns the x position after the last drawn grapheme.
pub(crate) fn draw_text_span(
    buf: &mut Buffer,
    mut x: u16,
    y: u16,
    content: &str,
    style: Style,
    max_x: u16,
) -> u16 {
    for grapheme in content.graphemes(true) {
        let w = UnicodeWidthStr::width(grapheme) as u16;
        if w == 0 {
            continue;
        }
        if x >= max_x || x.saturating_add(w) > max_x {
            break;
        }
        if let Some(c) = grapheme.chars().next() {
            let existing = buf.get(x, y).copied().unwrap_or_default();
            buf.set(x, y, style.apply_to(Cell::from_char(c).with_bg(existing.bg)));
        }
        x = x.saturating_add(w);
    }
    x
}
