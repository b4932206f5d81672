#![forbid(unsafe_code)]

use crate::block::Alignment;
use crate::{Widget, draw_text_span};
use folio_core::geometry::Rect;
use folio_render::display_width;
use folio_render::frame::Frame;
use folio_style::Style;
use unicode_segmentation::UnicodeSegmentation;

/// Word-wrap `text` to lines of at most `width` cells.
///
/// Explicit newlines start a new line. Words wider than `width` are broken
/// at grapheme boundaries. A zero width yields no lines.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }

    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_width = 0usize;

        for word in paragraph.split_whitespace() {
            let word_width = display_width(word);
            let sep = usize::from(line_width > 0);

            if line_width + sep + word_width <= width {
                if sep == 1 {
                    line.push(' ');
                }
                line.push_str(word);
                line_width += sep + word_width;
                continue;
            }

            if line_width > 0 {
                lines.push(std::mem::take(&mut line));
                line_width = 0;
            }
            if word_width <= width {
                line.push_str(word);
                line_width = word_width;
                continue;
            }

            for grapheme in word.graphemes(true) {
                let gw = display_width(grapheme);
                if line_width + gw > width && line_width > 0 {
                    lines.push(std::mem::take(&mut line));
                    line_width = 0;
                }
                line.push_str(grapheme);
                line_width += gw;
            }
        }
        lines.push(line);
    }
    lines
}

/// A block of text with optional wrapping and alignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph<'a> {
    text: &'a str,
    style: Style,
    alignment: Alignment,
    wrap: bool,
}

impl<'a> Paragraph<'a> {
    /// A non-wrapping, left-aligned paragraph.
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            style: Style::default(),
            alignment: Alignment::Left,
            wrap: false,
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Enable word wrapping.
    pub fn wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    fn lines(&self, width: u16) -> Vec<String> {
        if self.wrap {
            wrap_text(self.text, width as usize)
        } else {
            self.text.split('\n').map(str::to_string).collect()
        }
    }

    /// Rows needed to show the whole text at `width`.
    pub fn line_count(&self, width: u16) -> u16 {
        u16::try_from(self.lines(width).len()).unwrap_or(u16::MAX)
    }
}

impl Widget for Paragraph<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() {
            return;
        }

        for (row, line) in self.lines(area.width).iter().enumerate() {
            let Ok(row) = u16::try_from(row) else {
                break;
            };
            if row >= area.height {
                break;
            }
            let line_width = u16::try_from(display_width(line)).unwrap_or(u16::MAX);
            let slack = area.width.saturating_sub(line_width);
            let x = area.x
                + match self.alignment {
                    Alignment::Left => 0,
                    Alignment::Center => slack / 2,
                    Alignment::Right => slack,
                };
            draw_text_span(
                &mut frame.buffer,
                x,
                area.y + row,
                line,
                self.style,
                area.right(),
            );
        }
    }
}
